// SPDX-License-Identifier: PMPL-1.0-or-later
//! Random token sources for generated filter option names.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of lowercase base-36 tokens.
///
/// Implementations must be shareable across threads; the adapter draws two
/// tokens for every extra filter it converts.
pub trait TokenSource: Send + Sync {
    fn next_token(&self) -> String;
}

/// Uniformly random tokens from the thread-local RNG.
///
/// Names built from these are not checked for collisions.
#[derive(Debug, Clone)]
pub struct RandomTokenSource {
    length: usize,
}

impl RandomTokenSource {
    pub const DEFAULT_LENGTH: usize = 11;

    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomTokenSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}

impl TokenSource for RandomTokenSource {
    fn next_token(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect()
    }
}

/// Replays a fixed list of tokens, wrapping around at the end.
#[derive(Debug)]
pub struct SequenceTokenSource {
    tokens: Vec<String>,
    cursor: AtomicUsize,
}

impl SequenceTokenSource {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl TokenSource for SequenceTokenSource {
    fn next_token(&self) -> String {
        if self.tokens.is_empty() {
            return String::new();
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % self.tokens.len();
        self.tokens[i].clone()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for std::sync::Arc<T> {
    fn next_token(&self) -> String {
        (**self).next_token()
    }
}
