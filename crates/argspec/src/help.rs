//! Help text rendering.

use crate::arg::ArgSpec;
use crate::parser::Parser;

fn value_name(def: &dyn ArgSpec) -> String {
    def.name().to_ascii_uppercase().replace('-', "_")
}

fn format_arg_left(def: &dyn ArgSpec) -> String {
    if def.is_positional() {
        return def.display_name();
    }
    let mut out = match def.flag() {
        Some(c) => format!("-{c}, --{}", def.name()),
        None => format!("    --{}", def.name()),
    };
    if !def.is_switch() {
        out.push_str(&format!(" <{}>", value_name(def)));
    }
    out
}

fn format_arg_help(def: &dyn ArgSpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    let text = def.description().trim();
    if !text.is_empty() {
        parts.push(text.to_string());
    }
    if !def.value().is_empty() {
        parts.push(format!("[default: {}]", def.value()));
    }
    if !def.choices().is_empty() {
        let choices: Vec<&str> = def.choices().iter().map(String::as_str).collect();
        parts.push(format!("[possible values: {}]", choices.join(", ")));
    }
    parts.join(" ")
}

fn push_section(out: &mut String, title: &str, defs: &[&dyn ArgSpec]) {
    if defs.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}:\n"));
    let rows: Vec<(String, String)> = defs
        .iter()
        .map(|d| (format_arg_left(*d), format_arg_help(*d)))
        .collect();
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
        }
    }
}

/// Render usage, arguments and options of `parser`.
pub fn render(parser: &Parser) -> String {
    let mut out = String::new();
    if parser.description_text().trim().is_empty() {
        out.push_str(parser.program());
        out.push('\n');
    } else {
        out.push_str(&format!(
            "{} - {}\n",
            parser.program(),
            parser.description_text().trim()
        ));
    }

    let positionals: Vec<&dyn ArgSpec> = parser.positionals().map(|p| p as &dyn ArgSpec).collect();
    let options: Vec<&dyn ArgSpec> = parser.optionals().map(|o| o as &dyn ArgSpec).collect();

    let mut usage = format!("\nUsage: {}", parser.program());
    if !options.is_empty() {
        usage.push_str(" [OPTIONS]");
    }
    for def in &positionals {
        usage.push(' ');
        usage.push_str(&def.display_name());
    }
    out.push_str(&usage);
    out.push('\n');

    push_section(&mut out, "Arguments", &positionals);
    push_section(&mut out, "Options", &options);
    out
}

#[cfg(test)]
mod tests {
    use crate::{Arg, Parser};

    #[test]
    fn help_lists_every_spec() {
        let parser = Parser::new("show")
            .description("Show a file")
            .add_arg(Arg::new("file").description("File to show"))
            .unwrap()
            .add_arg(
                Arg::new("--format")
                    .flag("f")
                    .default_value("plain")
                    .choices(["plain", "json"])
                    .description("Output format"),
            )
            .unwrap()
            .add_arg(Arg::new("--verbose").default_value("false"))
            .unwrap();

        let text = parser.help();
        assert!(text.starts_with("show - Show a file\n"));
        assert!(text.contains("Usage: show [OPTIONS] <file>"));
        assert!(text.contains("Arguments:"));
        assert!(text.contains("<file>"));
        assert!(text.contains("File to show"));
        assert!(text.contains("-h, --help"));
        assert!(text.contains("-f, --format <FORMAT>"));
        assert!(text.contains("[default: plain] [possible values: json, plain]"));
        assert!(text.contains("    --verbose"));
        assert!(!text.contains("--verbose <"));
    }

    #[test]
    fn help_without_positionals_has_no_arguments_section() {
        let text = Parser::new("tool").help();
        assert!(text.starts_with("tool\n"));
        assert!(text.contains("Usage: tool [OPTIONS]\n"));
        assert!(!text.contains("Arguments:"));
        assert!(text.contains("Options:"));
    }
}
