//! Profile classes and the (season, day type) key into a reference table.

use std::{fmt, str::FromStr};

use crate::error::SlpError;

/// BDEW standard load profile classes.
pub const KNOWN_PROFILES: [&str; 11] = [
    "H0", "G0", "G1", "G2", "G3", "G4", "G5", "G6", "L0", "L1", "L2",
];

/// Identifier of a profile class, e.g. `H0` (household) or `G1` (business, workdays 8-18).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileType(String);

impl ProfileType {
    /// Validate and normalize (trim, uppercase) a profile code.
    pub fn new(code: &str) -> Result<Self, SlpError> {
        let code = code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SlpError::InvalidRequest(format!(
                "profile type must be a non-empty alphanumeric code, got {code:?}"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The code, e.g. `"G1"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Household family (`H*`); these get the dynamic sampling correction.
    pub fn is_household(&self) -> bool {
        self.0.starts_with('H')
    }

    /// One of the published BDEW classes.
    pub fn is_known(&self) -> bool {
        KNOWN_PROFILES.contains(&self.0.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = SlpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Season bucket, assigned by fixed calendar ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// Nov 1 – Mar 20
    Winter,
    /// May 15 – Sep 14
    Summer,
    /// the spring and autumn shoulders in between
    Transition,
}

impl Season {
    /// Every season, in reference-table order.
    pub const ALL: [Season; 3] = [Season::Winter, Season::Summer, Season::Transition];

    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Summer => "summer",
            Season::Transition => "transition",
        }
    }

    const fn ordinal(self) -> usize {
        match self {
            Season::Winter => 0,
            Season::Summer => 1,
            Season::Transition => 2,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Day-type bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    /// Monday to Friday.
    Workday,
    /// Saturday, plus Dec 24 and Dec 31.
    Saturday,
    /// Sunday or public holiday.
    SundayHoliday,
}

impl DayType {
    /// Every day type, in reference-table order.
    pub const ALL: [DayType; 3] = [DayType::Saturday, DayType::SundayHoliday, DayType::Workday];

    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            DayType::Workday => "workday",
            DayType::Saturday => "saturday",
            DayType::SundayHoliday => "sunday",
        }
    }

    const fn ordinal(self) -> usize {
        match self {
            DayType::Saturday => 0,
            DayType::SundayHoliday => 1,
            DayType::Workday => 2,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of one reference-table column.
///
/// Tables hold nine value columns; [`ProfileColumn::ALL`] lists them in the
/// order of the BDEW workbooks: winter, summer, transition, each split into
/// Saturday, Sunday/holiday, workday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileColumn {
    pub season: Season,
    pub day_type: DayType,
}

impl ProfileColumn {
    /// Number of value columns in a reference table.
    pub const COUNT: usize = 9;

    /// All columns in BDEW workbook order.
    pub const ALL: [ProfileColumn; Self::COUNT] = {
        let mut out = [ProfileColumn::new(Season::Winter, DayType::Saturday); Self::COUNT];
        let mut s = 0;
        while s < 3 {
            let mut d = 0;
            while d < 3 {
                out[s * 3 + d] = ProfileColumn::new(Season::ALL[s], DayType::ALL[d]);
                d += 1;
            }
            s += 1;
        }
        out
    };

    pub const fn new(season: Season, day_type: DayType) -> Self {
        Self { season, day_type }
    }

    /// Position within [`ProfileColumn::ALL`].
    pub const fn index(self) -> usize {
        self.season.ordinal() * 3 + self.day_type.ordinal()
    }

    /// Header name used in CSV tables, e.g. `winter_saturday`.
    pub fn name(self) -> String {
        format!("{}_{}", self.season.name(), self.day_type.name())
    }

    /// Inverse of [`ProfileColumn::name`] (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ProfileColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.season, self.day_type)
    }
}
