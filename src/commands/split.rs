use crate::pdf::split::{split_pages, split_pages_with_report, SplitOptions};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(input: P, options: &SplitOptions, json: bool) -> Result<()> {
    let input = input.as_ref();

    if json {
        let report = split_pages_with_report(input, options);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Per-page failures are already logged by the splitter.
    for output in split_pages(input, options) {
        println!("{}", output.display());
    }

    Ok(())
}
