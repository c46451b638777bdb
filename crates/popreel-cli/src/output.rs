use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

/// How command results are rendered: human-readable text, or JSON for
/// scripting against the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        self.emit("success", format!("{} {}", "✓".green(), msg), msg);
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg),
            _ => self.json(&json!({ "type": "error", "message": msg })),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        self.emit("warning", format!("{} {}", "⚠".yellow(), msg), msg);
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        self.emit("info", msg.to_string(), msg);
    }

    /// Plain line; reported as an info record in the JSON formats.
    pub fn println(&self, msg: impl AsRef<str>) {
        self.info(msg);
    }

    pub fn json(&self, data: &serde_json::Value) {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            _ => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }

    fn emit(&self, kind: &str, human: String, raw: &str) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", human),
            _ => self.json(&json!({ "type": kind, "message": raw })),
        }
    }
}
