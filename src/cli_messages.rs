//! Tagged status lines for the one-shot commands (`list`, `add`, `configure`, ...).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Info,
    Warn,
    Error,
    Success,
}

impl Tag {
    fn label(self) -> &'static str {
        match self {
            Tag::Info => "INFO",
            Tag::Warn => "WARN",
            Tag::Error => "ERROR",
            Tag::Success => "SUCCESS",
        }
    }

    /// ANSI SGR parameters for the tag.
    fn color(self) -> &'static str {
        match self {
            Tag::Info => "1;33",
            Tag::Warn => "1;91",
            Tag::Error => "1;31",
            Tag::Success => "1;32",
        }
    }
}

pub fn format_line(tag: Tag, title: &str, details: &str) -> String {
    let mut line = format!("\x1b[{}m[{}]\x1b[0m {}", tag.color(), tag.label(), title);
    if !details.is_empty() {
        line.push_str(":\t");
        line.push_str(details);
    }
    line
}

/// Errors go to stderr so `list --json` output stays parseable.
pub fn print_line(tag: Tag, title: &str, details: &str) {
    let line = format_line(tag, title, details);
    match tag {
        Tag::Error => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tag::Info, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tag::Warn, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tag::Error, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tag::Success, $title, &format!($($details)*))
    };
}
