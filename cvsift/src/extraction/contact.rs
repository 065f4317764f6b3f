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

use std::sync::LazyLock;
use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap());

// An optional "+", up to two groups of up to two digits and a ten digit number,
// which must not be followed by another digit.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\+?\d{0,2}[\s-]?\d{0,2}[\s-]?(?:\d{10}|\d{5}[\s-]?\d{5}|\d{3}[\s-]?\d{3}[\s-]?\d{4}))(?:\D|$)",
    )
    .unwrap()
});

/// The first email address in [text].
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL.find(text).map(|found| found.as_str())
}

/// The first phone number in [text], including the country code.
pub fn find_phone(text: &str) -> Option<&str> {
    PHONE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().trim())
}

#[cfg(test)]
mod test {
    use super::{find_email, find_phone};

    #[test]
    fn email_is_found() {
        assert_eq!(
            find_email("Contact: jane.doe@example.com for info"),
            Some("jane.doe@example.com")
        );
        assert_eq!(find_email("first a.b+cv@mail.co.uk then x@y.org"), Some("a.b+cv@mail.co.uk"));
        assert_eq!(find_email("no mail @ here"), None);
    }

    #[test]
    fn phone_with_country_code() {
        assert_eq!(find_phone("Call +91 98765 43210 today"), Some("+91 98765 43210"));
        assert_eq!(find_phone("+91 9876543210"), Some("+91 9876543210"));
        assert_eq!(find_phone("Phone: 555-123-4567"), Some("555-123-4567"));
    }

    #[test]
    fn phone_needs_ten_digits_without_a_trailing_digit() {
        assert_eq!(find_phone("zip 12345"), None);
        assert_eq!(find_phone("id 123456789"), None);
        assert_eq!(find_phone("no phone here"), None);
    }
}
