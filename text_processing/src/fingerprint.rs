//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::fmt::{Display, Formatter};
use std::hash::Hasher;
use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;

/// Something that contributes to the identity of a fitted artifact.
pub trait Fingerprintable {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H);
}

/// A stable 64 bit identity of fitted state. Two artifacts produced by the same
/// training run share the same fingerprint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn builder() -> FingerprintBuilder {
        FingerprintBuilder(XxHash64::with_seed(0))
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

pub struct FingerprintBuilder(XxHash64);

impl FingerprintBuilder {
    pub fn with<F: Fingerprintable + ?Sized>(mut self, value: &F) -> Self {
        value.write_fingerprint(&mut self.0);
        self
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint(self.0.finish())
    }
}

impl Fingerprintable for str {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H) {
        state.write(self.as_bytes());
        state.write_u8(0xff);
    }
}

impl Fingerprintable for u32 {
    fn write_fingerprint<H: Hasher>(&self, state: &mut H) {
        state.write_u32(*self);
    }
}

#[cfg(test)]
mod test {
    use super::Fingerprint;

    #[test]
    fn order_matters() {
        let a = Fingerprint::builder().with("a").with("b").finish();
        let b = Fingerprint::builder().with("b").with("a").finish();
        let c = Fingerprint::builder().with("a").with("b").finish();
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.to_string().len(), 16);
    }
}
