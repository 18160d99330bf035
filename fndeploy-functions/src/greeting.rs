// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `greeting` handler: `Hello world! <greeter name><random number>`.

use rand::Rng;

/// Name used when none is configured.
pub const DEFAULT_GREETER_NAME: &str = "Greetings from the shared module! ";

/// Upper bound (exclusive) of the random suffix.
const RANDOM_UPPER_BOUND: u32 = 100;

/// Builds greeting responses.
#[derive(Debug, Clone)]
pub struct Greeter {
    name: String,
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new(DEFAULT_GREETER_NAME)
    }
}

impl Greeter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Greeting with an explicit suffix number.
    pub fn greet_with(&self, number: u32) -> String {
        format!("Hello world! {}{}", self.name, number)
    }

    /// Greeting with a random suffix number.
    pub fn greet(&self) -> String {
        let number = rand::thread_rng().gen_range(0..RANDOM_UPPER_BOUND);
        self.greet_with(number)
    }
}
