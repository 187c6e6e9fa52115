//! The `lexigrade check` command.

use anyhow::Result;

use lexigrade_core::grading::classify;

pub fn execute(expected: String, actual: String, format: String) -> Result<()> {
    let result = classify(&expected, &actual);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            println!("{}", result.classification);
            println!("  expected:  {:?}", result.normalized_expected);
            println!("  actual:    {:?}", result.normalized_actual);
            println!("  distance:  {}", result.distance);
            println!("  threshold: {}", result.threshold);
        }
    }

    Ok(())
}
