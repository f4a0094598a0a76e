use anyhow::Result;

use super::COMMANDS;

/// Help text listing every command.
pub fn render() -> String {
    let mut out = String::from("Usage: kirok <command> [arguments]\n\nAvailable commands:\n");
    for spec in COMMANDS {
        out.push_str(&format!("  {:<18}{}\n", spec.usage, spec.description));
    }
    out
}

pub fn execute() -> Result<()> {
    print!("{}", render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        let text = render();
        assert!(text.starts_with("Usage: kirok <command> [arguments]"));
        assert!(text.contains("help"));
        assert!(text.contains("init [version]"));
        assert!(text.contains("Initializes a new kirok project."));
    }
}
