use std::fmt::{self, Debug, Formatter};

/// Seed for the pixel permutations, a pure function of the password bytes.
///
/// `seed = seed * 31 + byte` over the password, wrapping at 2^32.
/// The empty password yields `0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(u32);

impl Seed {
    pub fn derive(password: &[u8]) -> Self {
        Self(
            password
                .iter()
                .fold(0u32, |seed, &b| seed.wrapping_mul(31).wrapping_add(u32::from(b))),
        )
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The password drives where data lands (via [`Seed`]) and obfuscates the packet
/// with a repeating-key XOR keystream. An empty password is valid and leaves the
/// packet as it is.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new<S: Into<String>>(password: S) -> Self {
        Self(password.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn seed(&self) -> Seed {
        Seed::derive(self.as_bytes())
    }

    /// XORs `data` in place with the cycled password bytes.
    /// Applying it twice restores the input.
    pub fn apply_keystream(&self, data: &mut [u8]) {
        if self.is_empty() {
            return;
        }
        data.iter_mut()
            .zip(self.as_bytes().iter().cycle())
            .for_each(|(b, k)| *b ^= k);
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Password({})", "*".repeat(self.0.len()))
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(password.to_string())
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(password)
    }
}

impl From<Option<String>> for Password {
    fn from(password: Option<String>) -> Self {
        Self(password.unwrap_or_default())
    }
}
