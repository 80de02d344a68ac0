//! Cue names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Audio cue announcing a game-state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Played once before the first tick.
    Intro,
    RedLight,
    GreenLight,
    /// A subject was eliminated.
    Gunshot,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Intro, Cue::RedLight, Cue::GreenLight, Cue::Gunshot];

    /// Symbolic name used in logs and config.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Cue::Intro => "intro",
            Cue::RedLight => "red_light",
            Cue::GreenLight => "green_light",
            Cue::Gunshot => "gunshot",
        }
    }

    /// Asset file name used when the config does not override it.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Cue::Intro => "intro.wav",
            Cue::RedLight => "redlight.wav",
            Cue::GreenLight => "greenlight.wav",
            Cue::Gunshot => "gunshot.wav",
        }
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cue::ALL
            .into_iter()
            .find(|cue| cue.name() == s)
            .ok_or_else(|| format!("unknown cue '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for cue in Cue::ALL {
            assert_eq!(cue.name().parse::<Cue>(), Ok(cue));
        }
        assert!("siren".parse::<Cue>().is_err());
    }

    #[test]
    fn test_serde_uses_symbolic_name() {
        assert_eq!(serde_json::to_string(&Cue::GreenLight).unwrap(), "\"green_light\"");
        let cue: Cue = serde_json::from_str("\"gunshot\"").unwrap();
        assert_eq!(cue, Cue::Gunshot);
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(Cue::RedLight.default_file_name(), "redlight.wav");
        assert_eq!(Cue::Intro.to_string(), "intro");
    }
}
