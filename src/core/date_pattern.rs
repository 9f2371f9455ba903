//! Date/time patterns written as dateformat-style masks
//!
//! Configuration files describe transport timestamps with masks such as
//! `HH:MM:ss` or `yyyy-mm-dd'T'HH:MM:ss`. A mask is parsed once into tokens
//! and rendered with `chrono` on every log line.
//!
//! | Token | Output |
//! |-------|--------|
//! | `d` `dd` | day of month, `dd` zero-padded |
//! | `ddd` `dddd` | `Mon`, `Monday` |
//! | `m` `mm` | month number, `mm` zero-padded |
//! | `mmm` `mmmm` | `Jan`, `January` |
//! | `yy` `yyyy` | two / four digit year |
//! | `h` `hh` `H` `HH` | 12h / 24h hour, doubled form zero-padded |
//! | `M` `MM` | minutes |
//! | `s` `ss` | seconds |
//! | `l` `L` | milliseconds (3 digits), centiseconds (2 digits, truncated) |
//! | `t` `tt` `T` `TT` | `a`/`am`, `A`/`AM` |
//! | `Z` `o` | zone name, offset such as `+0200` |
//! | `S` `W` `N` | day ordinal suffix, ISO week, ISO weekday |
//! | `'…'` `"…"` | literal text |
//!
//! A mask prefixed with `UTC:` renders in UTC instead of local time. Named
//! masks (`isoDateTime`, `shortTime`, …) expand to their definitions, and a
//! pattern containing `%` is taken as a `chrono` strftime string.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike, Utc};
use std::fmt::{self, Write};

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn named_mask(name: &str) -> Option<&'static str> {
    Some(match name {
        "default" => "ddd mmm dd yyyy HH:MM:ss",
        "shortDate" => "m/d/yy",
        "mediumDate" => "mmm d, yyyy",
        "longDate" => "mmmm d, yyyy",
        "fullDate" => "dddd, mmmm d, yyyy",
        "shortTime" => "h:MM TT",
        "mediumTime" => "h:MM:ss TT",
        "longTime" => "h:MM:ss TT Z",
        "isoDate" => "yyyy-mm-dd",
        "isoTime" => "HH:MM:ss",
        "isoDateTime" => "yyyy-mm-dd'T'HH:MM:ss",
        "isoUtcDateTime" => "UTC:yyyy-mm-dd'T'HH:MM:ss'Z'",
        _ => return None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Day,
    DayPadded,
    DayShort,
    DayLong,
    Month,
    MonthPadded,
    MonthShort,
    MonthLong,
    Year2,
    Year4,
    Hour12,
    Hour12Padded,
    Hour24,
    Hour24Padded,
    Minute,
    MinutePadded,
    Second,
    SecondPadded,
    Millis,
    Centis,
    MeridiemShortLower,
    MeridiemLower,
    MeridiemShortUpper,
    MeridiemUpper,
    ZoneName,
    Offset,
    Ordinal,
    IsoWeek,
    IsoWeekday,
    Strftime(String),
}

/// A parsed date/time pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    utc: bool,
    tokens: Vec<Token>,
}

impl DatePattern {
    /// Parse a mask. Parsing never fails: characters that are not tokens
    /// are copied to the output verbatim.
    pub fn parse(pattern: &str) -> Self {
        let source = pattern.to_string();
        let mut mask = named_mask(pattern).unwrap_or(pattern);

        let mut utc = false;
        if let Some(rest) = mask.strip_prefix("UTC:") {
            utc = true;
            mask = rest;
        }

        let tokens = if mask.contains('%') && Self::is_valid_strftime(mask) {
            vec![Token::Strftime(mask.to_string())]
        } else {
            Self::tokenize(mask)
        };

        Self {
            source,
            utc,
            tokens,
        }
    }

    /// The pattern as it was written in configuration
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether this pattern renders in UTC rather than local time
    pub fn is_utc(&self) -> bool {
        self.utc
    }

    /// Render `datetime` in its own time zone, or in UTC for `UTC:` masks
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if self.utc {
            self.render(&datetime.with_timezone(&Utc))
        } else {
            self.render(datetime)
        }
    }

    /// Render an instant in the process' local time zone (or UTC for `UTC:` masks)
    pub fn format_local(&self, instant: &DateTime<Utc>) -> String {
        if self.utc {
            self.render(instant)
        } else {
            self.render(&instant.with_timezone(&Local))
        }
    }

    fn is_valid_strftime(mask: &str) -> bool {
        !StrftimeItems::new(mask).any(|item| matches!(item, Item::Error))
    }

    fn tokenize(mask: &str) -> Vec<Token> {
        let chars: Vec<char> = mask.chars().collect();
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        let run_len = |start: usize, c: char, max: usize| {
            chars[start..]
                .iter()
                .take(max)
                .take_while(|&&x| x == c)
                .count()
        };

        while i < chars.len() {
            let c = chars[i];
            let (token, width) = match c {
                '\'' | '"' => match chars[i + 1..].iter().position(|&x| x == c) {
                    Some(end) => {
                        literal.extend(&chars[i + 1..i + 1 + end]);
                        i += end + 2;
                        continue;
                    }
                    None => (None, 1),
                },
                'd' => {
                    let n = run_len(i, 'd', 4);
                    let token = match n {
                        1 => Token::Day,
                        2 => Token::DayPadded,
                        3 => Token::DayShort,
                        _ => Token::DayLong,
                    };
                    (Some(token), n)
                }
                'm' => {
                    let n = run_len(i, 'm', 4);
                    let token = match n {
                        1 => Token::Month,
                        2 => Token::MonthPadded,
                        3 => Token::MonthShort,
                        _ => Token::MonthLong,
                    };
                    (Some(token), n)
                }
                'y' => match run_len(i, 'y', 4) {
                    4 => (Some(Token::Year4), 4),
                    2 | 3 => (Some(Token::Year2), 2),
                    _ => (None, 1),
                },
                'H' | 'h' | 'M' | 's' | 'T' | 't' => {
                    let n = run_len(i, c, 2);
                    let token = match (c, n) {
                        ('H', 1) => Token::Hour24,
                        ('H', _) => Token::Hour24Padded,
                        ('h', 1) => Token::Hour12,
                        ('h', _) => Token::Hour12Padded,
                        ('M', 1) => Token::Minute,
                        ('M', _) => Token::MinutePadded,
                        ('s', 1) => Token::Second,
                        ('s', _) => Token::SecondPadded,
                        ('T', 1) => Token::MeridiemShortUpper,
                        ('T', _) => Token::MeridiemUpper,
                        ('t', 1) => Token::MeridiemShortLower,
                        _ => Token::MeridiemLower,
                    };
                    (Some(token), n)
                }
                'l' => (Some(Token::Millis), 1),
                'L' => (Some(Token::Centis), 1),
                'Z' => (Some(Token::ZoneName), 1),
                'o' => (Some(Token::Offset), 1),
                'S' => (Some(Token::Ordinal), 1),
                'W' => (Some(Token::IsoWeek), 1),
                'N' => (Some(Token::IsoWeekday), 1),
                _ => (None, 1),
            };

            match token {
                Some(token) => {
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(token);
                }
                None => literal.push(c),
            }
            i += width;
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        tokens
    }

    fn render<Tz>(&self, dt: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        let day = dt.day();
        let weekday = dt.weekday().num_days_from_sunday() as usize;
        let month0 = dt.month0() as usize;
        let hour12 = match dt.hour() % 12 {
            0 => 12,
            h => h,
        };
        let pm = dt.hour() >= 12;
        let millis = dt.timestamp_subsec_millis().min(999);
        let offset_secs = dt.offset().fix().local_minus_utc();

        for token in &self.tokens {
            // Writing into a String cannot fail.
            let _ = match token {
                Token::Literal(text) => write!(out, "{}", text),
                Token::Day => write!(out, "{}", day),
                Token::DayPadded => write!(out, "{:02}", day),
                Token::DayShort => write!(out, "{}", &DAY_NAMES[weekday][..3]),
                Token::DayLong => write!(out, "{}", DAY_NAMES[weekday]),
                Token::Month => write!(out, "{}", month0 + 1),
                Token::MonthPadded => write!(out, "{:02}", month0 + 1),
                Token::MonthShort => write!(out, "{}", &MONTH_NAMES[month0][..3]),
                Token::MonthLong => write!(out, "{}", MONTH_NAMES[month0]),
                Token::Year2 => write!(out, "{:02}", dt.year().rem_euclid(100)),
                Token::Year4 => write!(out, "{:04}", dt.year()),
                Token::Hour12 => write!(out, "{}", hour12),
                Token::Hour12Padded => write!(out, "{:02}", hour12),
                Token::Hour24 => write!(out, "{}", dt.hour()),
                Token::Hour24Padded => write!(out, "{:02}", dt.hour()),
                Token::Minute => write!(out, "{}", dt.minute()),
                Token::MinutePadded => write!(out, "{:02}", dt.minute()),
                Token::Second => write!(out, "{}", dt.second()),
                Token::SecondPadded => write!(out, "{:02}", dt.second()),
                Token::Millis => write!(out, "{:03}", millis),
                Token::Centis => write!(out, "{:02}", millis / 10),
                Token::MeridiemShortLower => out.write_str(if pm { "p" } else { "a" }),
                Token::MeridiemLower => out.write_str(if pm { "pm" } else { "am" }),
                Token::MeridiemShortUpper => out.write_str(if pm { "P" } else { "A" }),
                Token::MeridiemUpper => out.write_str(if pm { "PM" } else { "AM" }),
                Token::ZoneName => {
                    if self.utc {
                        out.write_str("UTC")
                    } else {
                        write!(out, "GMT{}", format_offset(offset_secs))
                    }
                }
                Token::Offset => out.write_str(&format_offset(offset_secs)),
                Token::Ordinal => out.write_str(ordinal_suffix(day)),
                Token::IsoWeek => write!(out, "{}", dt.iso_week().week()),
                Token::IsoWeekday => write!(out, "{}", dt.weekday().number_from_monday()),
                Token::Strftime(items) => write!(out, "{}", dt.format(items)),
            };
        }
        out
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn format_offset(offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let minutes = offset_secs.unsigned_abs() / 60;
    format!("{}{:02}{:02}", sign, minutes / 60, minutes % 60)
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
