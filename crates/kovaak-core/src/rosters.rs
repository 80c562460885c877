use serde::Serialize;

/// Benchmark families with a fixed scenario roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterKind {
    /// Sparky aim-training progression sheet.
    Sparky,
    /// Voltaic benchmark progression sheet.
    Voltaic,
}

impl RosterKind {
    /// The roster's scenario list.
    pub fn roster(self) -> &'static Roster {
        match self {
            RosterKind::Sparky => &SPARKY,
            RosterKind::Voltaic => &VOLTAIC,
        }
    }
}

/// Immutable, ordered list of scenario names making up one benchmark.
///
/// Row order in the tabular report follows `scenarios`, which matches the
/// row order of the spreadsheet the numbers are pasted into.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub name: &'static str,
    pub scenarios: &'static [&'static str],
}

impl Roster {
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

pub const SPARKY: Roster = Roster {
    name: "Sparky",
    scenarios: &[
        "1wall5targets_pasu Reload",
        "Popcorn Sparky",
        "Wide Wall 6Targets",
        "1wall 6targets small",
        "Bounce 180 Sparky",
        "Air no UFO no SKYBOTS",
        "Ground Plaza NO UFO",
        "Popcorn Goated Tracking Invincible",
        "Thin Gauntlet V2",
        "Pasu Track Invincible v2",
        "patTargetSwitch",
        "Bounce 180 Tracking",
        "kinTargetSwitch",
        "devTargetSwitch Goated",
        "voxTargetSwitch",
        "Air Dodge",
        "Pasu Dodge Easy",
        "Pistol Strafe Gallery Sparky",
        "lgc3 Reborn",
        "patTargetSwitch Dodge 360 v2",
    ],
};

pub const VOLTAIC: Roster = Roster {
    name: "Voltaic",
    scenarios: &[
        "Pasu Voltaic Easy",
        "B180 Voltaic Easy",
        "Popcorn Voltaic Easy",
        "ww3t Voltaic",
        "1w4ts Voltaic",
        "6 Sphere Hipfire Voltaic",
        "Smoothbot Voltaic Easy",
        "Air Angelic 4 Voltaic Easy",
        "PGTI Voltaic Easy",
        "FuglaaXYZ Voltaic Easy",
        "Ground Plaza Voltaic Easy",
        "Air Voltaic Easy",
        "patTS Voltaic Easy",
        "psalmTS Voltaic Easy",
        "voxTS Voltaic Easy",
        "kinTS Voltaic Easy",
        "B180T Voltaic Easy",
        "Smoothbot TS Voltaic Easy",
    ],
};
