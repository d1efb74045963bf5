//! Vectorized string methods over a single Object column
//!
//! Every method names the column it reads and returns a one-column
//! DataFrame under the same name. Null cells stay null in text results,
//! become NaN in integer results and read as `false` in boolean results.
//! Positions count characters, not bytes, and `start`/`stop` follow the
//! usual slice rules: negative values count from the end and out-of-range
//! values are clamped.

use super::*;

/// Borrowed string-method facade returned by `DataFrame::str`
#[derive(Debug, Clone, Copy)]
pub struct StringMethods<'a> {
    df: &'a DataFrame,
}

impl DataFrame {
    /// String methods for Object columns
    pub fn str(&self) -> StringMethods<'_> {
        StringMethods { df: self }
    }
}

/// Resolve `start`/`stop` against `len` characters
///
/// Returns `None` when the window starts past the end or after its stop.
fn window(len: usize, start: Option<isize>, stop: Option<isize>) -> Option<(usize, usize)> {
    let resolve = |pos: isize| {
        if pos < 0 {
            (pos + len as isize).max(0) as usize
        } else {
            pos as usize
        }
    };

    let start = start.map_or(0, resolve);
    let stop = stop.map_or(len, resolve).min(len);

    if start > len || start > stop {
        None
    } else {
        Some((start, stop))
    }
}

fn char_slice(s: &str, start: usize, stop: usize) -> String {
    s.chars().skip(start).take(stop - start).collect()
}

/// Character position of `sub` within the window, if present
fn find_in(s: &str, sub: &str, start: Option<isize>, stop: Option<isize>) -> Option<usize> {
    let (start, stop) = window(s.chars().count(), start, stop)?;
    let haystack = char_slice(s, start, stop);
    haystack
        .find(sub)
        .map(|byte| haystack[..byte].chars().count() + start)
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = is_cased(c);
    }
    out
}

fn istitle(s: &str) -> bool {
    let mut prev_cased = false;
    let mut any_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else {
            prev_cased = false;
        }
    }
    any_cased
}

fn swapcase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_uppercase() {
            out.extend(c.to_lowercase());
        } else if c.is_lowercase() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn center(s: &str, width: usize, fillchar: char) -> String {
    let len = s.chars().count();
    if width <= len {
        return s.to_string();
    }

    let pad = width - len;
    let left = pad / 2 + (pad & width & 1);
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat(fillchar).take(left));
    out.push_str(s);
    out.extend(std::iter::repeat(fillchar).take(pad - left));
    out
}

fn zfill(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if width <= len {
        return s.to_string();
    }

    let zeros = "0".repeat(width - len);
    match s.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{}{}{}", sign, zeros, &s[1..]),
        _ => format!("{}{}", zeros, s),
    }
}

fn strip_set(chars: Option<&str>) -> impl Fn(char) -> bool + '_ {
    move |c| match chars {
        Some(set) => set.contains(c),
        None => c.is_whitespace(),
    }
}

/// Every character satisfies `f`, and there is at least one
fn all_chars(s: &str, f: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(f)
}

impl<'a> StringMethods<'a> {
    fn strings(&self, col: &str) -> Result<&'a ObjectArray> {
        let column = self
            .df
            .column(col)
            .ok_or_else(|| DataError::ColumnNotFound(col.to_string()))?;

        column.as_object().ok_or(DataError::TypeMismatch {
            expected: "string",
            actual: column.dtype(),
        })
    }

    fn wrap(&self, col: &str, column: Column) -> Result<DataFrame> {
        DataFrameBuilder::new().with_column(col, column)?.build()
    }

    fn map_text<F>(&self, col: &str, f: F) -> Result<DataFrame>
    where
        F: Fn(&str) -> Option<String>,
    {
        let out: ObjectArray = self
            .strings(col)?
            .iter()
            .map(|cell| cell.as_deref().and_then(&f))
            .collect();
        self.wrap(col, Column::Object(out))
    }

    fn map_bool<F>(&self, col: &str, f: F) -> Result<DataFrame>
    where
        F: Fn(&str) -> bool,
    {
        let out: BoolArray = self
            .strings(col)?
            .iter()
            .map(|cell| cell.as_deref().is_some_and(&f))
            .collect();
        self.wrap(col, Column::Bool(out))
    }

    fn map_int<F>(&self, col: &str, f: F) -> Result<DataFrame>
    where
        F: Fn(&str) -> Result<i64>,
    {
        let cells = self.strings(col)?;
        let mut out = Vec::with_capacity(cells.len());
        for cell in cells {
            out.push(match cell {
                Some(s) => Value::Int(f(s)?),
                None => Value::Null,
            });
        }
        self.wrap(col, Column::from_values(out, ColumnKind::Int))
    }

    /// First character uppercased, the rest lowercased
    pub fn capitalize(&self, col: &str) -> Result<DataFrame> {
        self.map_text(col, |s| Some(capitalize(s)))
    }

    /// Center within `width` characters, padding with `fillchar` (space by default)
    pub fn center(&self, col: &str, width: usize, fillchar: Option<char>) -> Result<DataFrame> {
        let fillchar = fillchar.unwrap_or(' ');
        self.map_text(col, |s| Some(center(s, width, fillchar)))
    }

    /// Non-overlapping occurrences of `sub` within the window
    pub fn count(
        &self,
        col: &str,
        sub: &str,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<DataFrame> {
        self.map_int(col, |s| {
            let n = match window(s.chars().count(), start, stop) {
                None => 0,
                Some((start, stop)) if sub.is_empty() => stop - start + 1,
                Some((start, stop)) => char_slice(s, start, stop).matches(sub).count(),
            };
            Ok(n as i64)
        })
    }

    pub fn endswith(
        &self,
        col: &str,
        suffix: &str,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<DataFrame> {
        self.map_bool(col, |s| {
            window(s.chars().count(), start, stop)
                .is_some_and(|(start, stop)| char_slice(s, start, stop).ends_with(suffix))
        })
    }

    pub fn startswith(
        &self,
        col: &str,
        prefix: &str,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<DataFrame> {
        self.map_bool(col, |s| {
            window(s.chars().count(), start, stop)
                .is_some_and(|(start, stop)| char_slice(s, start, stop).starts_with(prefix))
        })
    }

    /// Lowest position of `sub`, or -1 when it does not occur
    pub fn find(
        &self,
        col: &str,
        sub: &str,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<DataFrame> {
        self.map_int(col, |s| {
            Ok(find_in(s, sub, start, stop).map_or(-1, |pos| pos as i64))
        })
    }

    /// Number of characters
    pub fn len(&self, col: &str) -> Result<DataFrame> {
        self.map_int(col, |s| Ok(s.chars().count() as i64))
    }

    /// Character at `index`, counting from the end when negative; null when out of range
    pub fn get(&self, col: &str, index: isize) -> Result<DataFrame> {
        self.map_text(col, |s| {
            let len = s.chars().count() as isize;
            let pos = if index < 0 { index + len } else { index };
            if pos < 0 || pos >= len {
                None
            } else {
                s.chars().nth(pos as usize).map(String::from)
            }
        })
    }

    /// Like `find`, but a missing substring is an error
    pub fn index(
        &self,
        col: &str,
        sub: &str,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<DataFrame> {
        self.map_int(col, |s| {
            find_in(s, sub, start, stop)
                .map(|pos| pos as i64)
                .ok_or_else(|| {
                    DataError::InvalidParameter(format!("substring '{}' not found in '{}'", sub, s))
                })
        })
    }

    pub fn isalnum(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, |s| all_chars(s, char::is_alphanumeric))
    }

    pub fn isalpha(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, |s| all_chars(s, char::is_alphabetic))
    }

    /// Non-empty and made only of the ASCII digits `0` to `9`
    pub fn isdecimal(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, |s| all_chars(s, |c| c.is_ascii_digit()))
    }

    /// At least one cased character, and no uppercase ones
    pub fn islower(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, |s| {
            s.chars().any(is_cased) && !s.chars().any(char::is_uppercase)
        })
    }

    pub fn isnumeric(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, |s| all_chars(s, char::is_numeric))
    }

    pub fn isspace(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, |s| all_chars(s, char::is_whitespace))
    }

    /// Every word starts uppercase and continues lowercase
    pub fn istitle(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, istitle)
    }

    /// At least one cased character, and no lowercase ones
    pub fn isupper(&self, col: &str) -> Result<DataFrame> {
        self.map_bool(col, |s| {
            s.chars().any(is_cased) && !s.chars().any(char::is_lowercase)
        })
    }

    /// Strip leading characters in `chars`, or whitespace when `None`
    pub fn lstrip(&self, col: &str, chars: Option<&str>) -> Result<DataFrame> {
        self.map_text(col, |s| Some(s.trim_start_matches(strip_set(chars)).to_string()))
    }

    /// Strip trailing characters in `chars`, or whitespace when `None`
    pub fn rstrip(&self, col: &str, chars: Option<&str>) -> Result<DataFrame> {
        self.map_text(col, |s| Some(s.trim_end_matches(strip_set(chars)).to_string()))
    }

    /// Strip both ends
    pub fn strip(&self, col: &str, chars: Option<&str>) -> Result<DataFrame> {
        self.map_text(col, |s| Some(s.trim_matches(strip_set(chars)).to_string()))
    }

    /// Replace `old` with `new`, at most `count` times when given
    pub fn replace(
        &self,
        col: &str,
        old: &str,
        new: &str,
        count: Option<usize>,
    ) -> Result<DataFrame> {
        self.map_text(col, |s| {
            Some(match count {
                Some(n) => s.replacen(old, new, n),
                None => s.replace(old, new),
            })
        })
    }

    pub fn swapcase(&self, col: &str) -> Result<DataFrame> {
        self.map_text(col, |s| Some(swapcase(s)))
    }

    /// Uppercase the first letter of every word, lowercase the rest
    pub fn title(&self, col: &str) -> Result<DataFrame> {
        self.map_text(col, |s| Some(title(s)))
    }

    pub fn lower(&self, col: &str) -> Result<DataFrame> {
        self.map_text(col, |s| Some(s.to_lowercase()))
    }

    pub fn upper(&self, col: &str) -> Result<DataFrame> {
        self.map_text(col, |s| Some(s.to_uppercase()))
    }

    /// Left-pad with zeros to `width`, keeping a leading sign in front
    pub fn zfill(&self, col: &str, width: usize) -> Result<DataFrame> {
        self.map_text(col, |s| Some(zfill(s, width)))
    }
}
