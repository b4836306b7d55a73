//! Locale-aware text rendering for small vectors.
//!
//! A vector renders as `<` + elements joined by `separator + " "` + `>`,
//! where the separator is the locale's digit-group separator
//! (`<4, 6>` in the invariant locale, `<4. 6>` in German).

/// Separators and precision used to render vector elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    group_separator: String,
    decimal_separator: String,
    precision: Option<usize>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::invariant()
    }
}

// (locale prefixes, group separator, decimal separator)
const LOCALE_TABLE: &[(&[&str], &str, &str)] = &[
    (&["de_CH", "de-CH"], "'", "."),
    (
        &["de", "nl", "it", "es", "da", "id", "tr", "el", "pt_BR", "pt-BR"],
        ".",
        ",",
    ),
    (
        &["fr", "ru", "pl", "cs", "sv", "nb", "fi", "uk", "sk", "hu"],
        "\u{a0}",
        ",",
    ),
];

impl NumberFormat {
    /// Culture-independent format: `,` groups, `.` decimals, shortest
    /// round-trip digits.
    #[must_use]
    pub fn invariant() -> Self {
        Self {
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            precision: None,
        }
    }

    /// Format for a POSIX or BCP 47 locale tag such as `de_DE.UTF-8` or `fr-FR`.
    ///
    /// Unknown tags, `C` and `POSIX` fall back to [`NumberFormat::invariant`].
    #[must_use]
    pub fn for_locale(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        for (prefixes, group, decimal) in LOCALE_TABLE {
            let matched = prefixes.iter().any(|prefix| {
                tag == *prefix
                    || tag
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with(['_', '-']))
            });
            if matched {
                return Self::invariant()
                    .with_group_separator(group)
                    .with_decimal_separator(decimal);
            }
        }
        Self::invariant()
    }

    /// Format of the process locale, from `LC_ALL`, `LC_NUMERIC` then `LANG`.
    #[must_use]
    pub fn current() -> Self {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map_or_else(Self::invariant, |tag| Self::for_locale(&tag))
    }

    /// Fixed number of fractional digits.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Replaces the element separator.
    #[must_use]
    pub fn with_group_separator(mut self, separator: &str) -> Self {
        self.group_separator = separator.to_string();
        self
    }

    /// Replaces the decimal point.
    #[must_use]
    pub fn with_decimal_separator(mut self, separator: &str) -> Self {
        self.decimal_separator = separator.to_string();
        self
    }

    /// Separator placed between elements, before the space.
    #[must_use]
    pub fn group_separator(&self) -> &str {
        &self.group_separator
    }

    /// Decimal point.
    #[must_use]
    pub fn decimal_separator(&self) -> &str {
        &self.decimal_separator
    }

    /// Fixed fractional digits, if any.
    #[must_use]
    pub fn precision(&self) -> Option<usize> {
        self.precision
    }

    /// Renders one element.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        let text = match self.precision {
            Some(precision) => format!("{value:.precision$}"),
            None => value.to_string(),
        };
        if self.decimal_separator == "." {
            text
        } else {
            text.replacen('.', &self.decimal_separator, 1)
        }
    }

    /// Renders `values` inside angle brackets.
    #[must_use]
    pub fn format_values(&self, values: &[f64]) -> String {
        let mut out = String::with_capacity(2 + values.len() * 8);
        out.push('<');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.group_separator);
                out.push(' ');
            }
            out.push_str(&self.format_value(*value));
        }
        out.push('>');
        out
    }
}
