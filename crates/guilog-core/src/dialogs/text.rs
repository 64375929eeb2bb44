//! Error dialog text

use super::traits::{DialogButton, DialogChoice, DialogSpec};
use crate::types::Severity;

/// Default bug report page
pub const DEFAULT_HELP_URL: &str = "https://github.com/deskflow/deskflow/issues";

/// Default link color in the rich text body
pub const DEFAULT_LINK_COLOR: &str = "#4285F4";

/// Product details shown in error dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogBranding {
    /// Product version printed in the error block (without the `v`)
    pub version: String,
    /// Where users should report the error
    pub help_url: String,
    /// CSS color of the report link
    pub link_color: String,
}

impl Default for DialogBranding {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            help_url: DEFAULT_HELP_URL.to_string(),
            link_color: DEFAULT_LINK_COLOR.to_string(),
        }
    }
}

impl DialogBranding {
    /// Branding for a given product version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Set the bug report URL
    pub fn with_help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = url.into();
        self
    }

    /// Set the link color
    pub fn with_link_color(mut self, color: impl Into<String>) -> Self {
        self.link_color = color.into();
        self
    }
}

/// Text of a critical or fatal error dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialogText {
    pub title: &'static str,
    pub headline: &'static str,
    pub help_url: String,
    pub link_color: String,
    /// Contents of the preformatted block: version, message, location
    pub details: String,
}

impl ErrorDialogText {
    /// Build the text for a message. Only `Fatal` gets the fatal wording.
    pub fn new(
        severity: Severity,
        message: &str,
        source_location: &str,
        branding: &DialogBranding,
    ) -> Self {
        let fatal = severity == Severity::Fatal;
        Self {
            title: if fatal { "Fatal error" } else { "Critical error" },
            headline: if fatal {
                "Sorry, a fatal error has occurred and the application must now exit."
            } else {
                "Sorry, a critical error has occurred."
            },
            help_url: branding.help_url.clone(),
            link_color: branding.link_color.clone(),
            details: format!("v{}\n{}\n{}", branding.version, message, source_location),
        }
    }

    /// Rich text body
    pub fn html(&self) -> String {
        format!(
            "<p>{}</p>\
             <p>Please <a href=\"{}\" style=\"color: {}\">report a bug</a> \
             and copy/paste the following error:</p>\
             <pre>{}</pre>",
            self.headline,
            self.help_url,
            self.link_color,
            escape_html(&self.details),
        )
    }

    /// Plain text body
    pub fn plain(&self) -> String {
        format!(
            "{}\n\nPlease report a bug ({}) and copy/paste the following error:\n\n{}",
            self.headline, self.help_url, self.details
        )
    }

    /// Blocking dialog for a fatal error: a single Abort action
    pub fn into_fatal_spec(self) -> DialogSpec {
        self.into_spec(vec![DialogButton::new(DialogChoice::Acknowledge, "Abort")])
    }

    /// Non-blocking dialog for a critical error: OK and Ignore
    pub fn into_critical_spec(self) -> DialogSpec {
        self.into_spec(vec![
            DialogButton::new(DialogChoice::Acknowledge, "OK"),
            DialogButton::new(DialogChoice::Ignore, "Ignore"),
        ])
    }

    fn into_spec(self, buttons: Vec<DialogButton>) -> DialogSpec {
        DialogSpec {
            title: self.title.to_string(),
            html: self.html(),
            plain: self.plain(),
            buttons,
        }
    }
}

/// Escape text placed inside the rich text body
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding() -> DialogBranding {
        DialogBranding::new("1.2.3")
            .with_help_url("https://example.com/bugs")
            .with_link_color("#123456")
    }

    #[test]
    fn test_critical_text() {
        let text =
            ErrorDialogText::new(Severity::Critical, "socket closed", "net.rs:9", &branding());
        assert_eq!(text.title, "Critical error");
        assert_eq!(text.details, "v1.2.3\nsocket closed\nnet.rs:9");

        let html = text.html();
        assert!(html.starts_with("<p>Sorry, a critical error has occurred.</p>"));
        let link = concat!(
            r#"<a href="https://example.com/bugs" "#,
            r#"style="color: #123456">report a bug</a>"#,
        );
        assert!(html.contains(link));
        assert!(html.ends_with("<pre>v1.2.3\nsocket closed\nnet.rs:9</pre>"));
    }

    #[test]
    fn test_fatal_text() {
        let text = ErrorDialogText::new(Severity::Fatal, "out of memory", "a.cpp:10", &branding());
        assert_eq!(text.title, "Fatal error");
        assert!(text.plain().starts_with(
            "Sorry, a fatal error has occurred and the application must now exit."
        ));
        assert!(text.plain().ends_with("v1.2.3\nout of memory\na.cpp:10"));
    }

    #[test]
    fn test_empty_message_renders_empty_block_lines() {
        let text = ErrorDialogText::new(Severity::Critical, "", "", &branding());
        assert!(text.html().ends_with("<pre>v1.2.3\n\n</pre>"));
    }

    #[test]
    fn test_message_markup_is_escaped() {
        let text = ErrorDialogText::new(Severity::Critical, "<b>x</b> & y", "", &branding());
        assert!(text.html().contains("&lt;b&gt;x&lt;/b&gt; &amp; y"));
        assert!(text.plain().contains("<b>x</b> & y"));
    }

    #[test]
    fn test_specs_have_expected_buttons() {
        let fatal = ErrorDialogText::new(Severity::Fatal, "m", "", &branding()).into_fatal_spec();
        assert_eq!(fatal.buttons.len(), 1);
        assert_eq!(fatal.label_for(DialogChoice::Acknowledge), Some("Abort"));

        let critical =
            ErrorDialogText::new(Severity::Critical, "m", "", &branding()).into_critical_spec();
        assert_eq!(critical.title, "Critical error");
        assert_eq!(critical.label_for(DialogChoice::Acknowledge), Some("OK"));
        assert_eq!(critical.label_for(DialogChoice::Ignore), Some("Ignore"));
    }

    #[test]
    fn test_default_branding_uses_crate_version() {
        let branding = DialogBranding::default();
        assert_eq!(branding.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(branding.help_url, DEFAULT_HELP_URL);
    }
}
