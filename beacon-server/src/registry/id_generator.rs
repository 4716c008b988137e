use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Source of six-digit codes shared by client ids and room ids.
///
/// Codes are not unique on their own; callers check them against their live table.
pub trait CodeSource: Send {
    fn next_code(&mut self) -> String;
}

/// Draws per id before the code space is treated as full.
pub const MAX_DRAWS: usize = 1_000;

/// First code `taken` does not claim, or `None` after [`MAX_DRAWS`] misses.
pub fn draw_unused(ids: &mut dyn CodeSource, taken: impl Fn(&str) -> bool) -> Option<String> {
    (0..MAX_DRAWS)
        .map(|_| ids.next_code())
        .find(|code| !taken(code))
}

pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeSource for IdGenerator {
    fn next_code(&mut self) -> String {
        self.rng.random_range(CODE_MIN..=CODE_MAX).to_string()
    }
}


/// Hands out a fixed list of codes, then falls back to a counter.
#[cfg(test)]
pub(crate) struct ScriptedCodes {
    codes: std::collections::VecDeque<String>,
    counter: u32,
    repeat: Option<String>,
}

#[cfg(test)]
impl ScriptedCodes {
    pub(crate) fn new(codes: &[&str]) -> Self {
        Self {
            codes: codes.iter().map(|c| c.to_string()).collect(),
            counter: CODE_MIN,
            repeat: None,
        }
    }

    /// Once the scripted codes are used up, keep returning `code`.
    pub(crate) fn then_repeat(mut self, code: &str) -> Self {
        self.repeat = Some(code.to_string());
        self
    }
}

#[cfg(test)]
impl CodeSource for ScriptedCodes {
    fn next_code(&mut self) -> String {
        if let Some(code) = self.codes.pop_front() {
            return code;
        }
        if let Some(code) = &self.repeat {
            return code.clone();
        }
        self.counter += 1;
        self.counter.to_string()
    }
}
