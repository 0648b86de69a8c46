use std::path::Path;

use crate::scenario::Scenario;

pub fn run(output: Option<&Path>) -> Result<(), String> {
    let content = Scenario::demo().to_json()?;

    if let Some(path) = output {
        std::fs::write(path, format!("{content}\n"))
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Wrote demo scenario to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
