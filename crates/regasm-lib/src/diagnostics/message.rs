use super::Span;

/// Diagnostic kinds produced while reading a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Structure
    UnclosedGroup,
    UnexpectedEnd,
    ExpectedOperator,
    ExpectedOpenParen,
    UnknownOperator,
    TrailingInput,

    // Symbols
    NonAsciiSymbol,

    // Limits
    NestingTooDeep,

    // Lints
    RedundantStar,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::RedundantStar => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Hint attached to every diagnostic of this kind.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedOperator => Some("follow a group with `.(..)`, `|(..)` or `*`"),
            Self::ExpectedOpenParen => Some("operands of `.` and `|` must be parenthesized"),
            Self::TrailingInput => Some("combine patterns with an operator, e.g. `(a).(b)`"),
            Self::RedundantStar => Some("`(_)*` matches only the empty string, use `_`"),
            _ => None,
        }
    }

    /// Message used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedGroup => "missing closing `)`",
            Self::UnexpectedEnd => "unexpected end of pattern",
            Self::ExpectedOperator => "expected operator after group",
            Self::ExpectedOpenParen => "expected `(`",
            Self::UnknownOperator => "unknown operator",
            Self::TrailingInput => "unexpected input after pattern",
            Self::NonAsciiSymbol => "symbols must be ASCII",
            Self::NestingTooDeep => "pattern nested too deeply",
            Self::RedundantStar => "star over `_` is redundant",
        }
    }

    /// Template for detailed messages; `{}` is replaced by the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownOperator => "unknown operator `{}`".to_string(),
            Self::NonAsciiSymbol => "`{}` is not an ASCII symbol".to_string(),
            Self::NestingTooDeep => "pattern nested deeper than {} groups".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// - `None` → `fallback_message()`
    /// - `Some(detail)` → `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(str::to_string).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.span.start,
            self.span.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
