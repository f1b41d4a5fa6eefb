use miette::{Diagnostic, SourceSpan};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result},
};

#[derive(Debug, Diagnostic)]
pub enum TinttyError {
    #[diagnostic(code(tintty::terminal), url(docsrs))]
    Terminal {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(tintty::io), url(docsrs))]
    Io {
        #[source_code]
        src: String,
        #[label("io error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(tintty::clipboard), url(docsrs))]
    Clipboard {
        #[source_code]
        src: String,
        #[label("clipboard error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(tintty::event), url(docsrs))]
    Event {
        #[source_code]
        src: String,
        #[label("event error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(tintty::channel), url(docsrs))]
    ChannelClosed {
        #[source_code]
        src: String,
        #[label("channel closed")]
        err_span: SourceSpan,
    },
}

pub type TinttyResult<T> = miette::Result<T>;

// Helper functions to create errors with context
impl Display for TinttyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TinttyError::Terminal { msg, .. } => write!(f, "Terminal error: {}", msg),
            TinttyError::Io { msg, .. } => write!(f, "IO error: {}", msg),
            TinttyError::Clipboard { msg, .. } => write!(f, "Clipboard error: {}", msg),
            TinttyError::Event { msg, .. } => write!(f, "Event error: {}", msg),
            TinttyError::ChannelClosed { .. } => write!(f, "Channel closed"),
        }
    }
}

impl Error for TinttyError {}

impl TinttyError {
    pub fn terminal(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Terminal {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn io(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Io {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn clipboard(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Clipboard {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn event(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Event {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn channel_closed(src: impl Into<String>, err_span: impl Into<SourceSpan>) -> Self {
        Self::ChannelClosed {
            src: src.into(),
            err_span: err_span.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = TinttyError::clipboard(
            "clipboard write".to_string(),
            (0, 15),
            "failed to write to system clipboard".to_string(),
        );

        match err {
            TinttyError::Clipboard { src, err_span, msg } => {
                assert_eq!(src, "clipboard write");
                assert_eq!(err_span, (0, 15).into());
                assert_eq!(msg, "failed to write to system clipboard");
            }
            _ => panic!("Wrong error variant"),
        }
    }
}
