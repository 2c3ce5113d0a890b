//! The parse engine: a rune buffer with a cursor, a token array, and a
//! backtracking discipline.
//!
//! The engine is a plain recursive-descent PEG machine. Rules are ordinary
//! methods returning `bool`; ordered choice tries alternatives left to
//! right and the first match wins; lookahead is unlimited through cheap
//! checkpoints. There is no memoization — inputs are short (names rarely
//! exceed 256 runes) and each rule parses fresh.
//!
//! # State
//!
//! - a sentinel-terminated rune buffer (the sentinel is a code point that
//!   never survives preprocessing, so rules can read one rune past the end
//!   without bounds checks);
//! - the current position, in runes;
//! - a growable token array `{rule, start, end}`, trimmed on backtrack;
//! - a farthest-advance watermark kept for diagnostics;
//! - the warning set populated by semantic actions.
//!
//! One engine parses one name at a time; `reset` rearms it for the next
//! buffer. Instances are reused through the facade's pool.

use rustc_hash::FxHashSet;

use nomen_ir::Warning;

use crate::rule::Rule;

/// End-of-buffer sentinel. Preprocessing can never produce it, so a single
/// comparison doubles as a bounds check.
pub(crate) const SENTINEL: char = '\u{10FFFF}';

/// A recorded grammar token. Positions are rune offsets into the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub rule: Rule,
    pub start: u32,
    pub end: u32,
}

/// A saved engine position for backtracking. `Copy`, so checkpoints cost
/// nothing to take and drop.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Checkpoint {
    pos: usize,
    tokens: usize,
}

/// The PEG parse engine.
pub struct Engine {
    buf: Vec<char>,
    /// Rune length of the real content, excluding the sentinel.
    len: usize,
    pos: usize,
    tokens: Vec<Token>,
    max_pos: usize,
    warnings: FxHashSet<Warning>,
    pub(crate) cultivars_enabled: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            buf: Vec::with_capacity(64),
            len: 0,
            pos: 0,
            tokens: Vec::with_capacity(64),
            max_pos: 0,
            warnings: FxHashSet::default(),
            cultivars_enabled: true,
        }
    }

    /// Disable the cultivar grammar branch.
    pub fn disable_cultivars(&mut self) {
        self.cultivars_enabled = false;
    }

    /// Rearm the engine for a new buffer. Reuses allocations.
    pub fn reset(&mut self, text: &str) {
        self.buf.clear();
        self.buf.extend(text.chars());
        self.len = self.buf.len();
        self.buf.push(SENTINEL);
        self.pos = 0;
        self.tokens.clear();
        self.max_pos = 0;
        self.warnings.clear();
    }

    /// Run the grammar against the current buffer.
    ///
    /// Succeeds only when the whole buffer is consumed (the root rule ends
    /// with an end-of-input check). On failure the token array is left
    /// empty and the watermark records the farthest position reached.
    pub fn run(&mut self) -> bool {
        debug_assert_eq!(self.pos, 0, "engine not reset before run");
        let ok = self.sci_name();
        if !ok {
            tracing::debug!(
                max_pos = self.max_pos,
                len = self.len,
                "grammar rejected input"
            );
        }
        ok
    }

    // === Cursor primitives ===

    /// Rune at the current position; the sentinel at or past the end.
    #[inline]
    pub(crate) fn cur(&self) -> char {
        self.buf[self.pos]
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.len
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Advance one rune.
    #[inline]
    pub(crate) fn bump(&mut self) {
        debug_assert!(self.pos < self.len, "bump past end of buffer");
        self.pos += 1;
        if self.pos > self.max_pos {
            self.max_pos = self.pos;
        }
    }

    /// Consume `c` if it is the current rune.
    #[inline]
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.cur() == c {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a literal, rune by rune. Restores position on partial match.
    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        let start = self.pos;
        for c in s.chars() {
            if !self.eat(c) {
                self.pos = start;
                return false;
            }
        }
        true
    }

    /// Consume one rune matching the predicate.
    #[inline]
    pub(crate) fn eat_if(&mut self, pred: impl Fn(char) -> bool) -> bool {
        if !self.is_eof() && pred(self.cur()) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume runes while the predicate holds; returns how many.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while !self.is_eof() && pred(self.cur()) {
            self.bump();
        }
        self.pos - start
    }

    // === Backtracking ===

    #[inline]
    pub(crate) fn save(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            tokens: self.tokens.len(),
        }
    }

    /// Roll back to a checkpoint, trimming tokens recorded since.
    #[inline]
    pub(crate) fn restore(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.tokens.truncate(cp.tokens);
    }

    /// Run a rule body and record a token for it on success; backtrack
    /// fully on failure. Children recorded by the body precede the parent
    /// in the token array, which is what the tree builder expects.
    pub(crate) fn node(&mut self, rule: Rule, body: impl FnOnce(&mut Self) -> bool) -> bool {
        let cp = self.save();
        if body(self) {
            self.tokens.push(Token {
                rule,
                start: cp.pos as u32,
                end: self.pos as u32,
            });
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// Try a parser; backtrack silently when it fails. Always succeeds.
    #[inline]
    pub(crate) fn opt(&mut self, body: impl FnOnce(&mut Self) -> bool) -> bool {
        let cp = self.save();
        if !body(self) {
            self.restore(cp);
        }
        true
    }

    /// Positive lookahead: match without consuming.
    pub(crate) fn ahead(&mut self, body: impl FnOnce(&mut Self) -> bool) -> bool {
        let cp = self.save();
        let ok = body(self);
        self.restore(cp);
        ok
    }

    /// Negative lookahead: succeed only when the body does not match.
    pub(crate) fn not_ahead(&mut self, body: impl FnOnce(&mut Self) -> bool) -> bool {
        !self.ahead(body)
    }

    // === Warnings ===

    pub(crate) fn warn(&mut self, warning: Warning) {
        self.warnings.insert(warning);
    }

    pub fn warnings(&self) -> &FxHashSet<Warning> {
        &self.warnings
    }

    pub(crate) fn take_warnings(&mut self) -> FxHashSet<Warning> {
        std::mem::take(&mut self.warnings)
    }

    // === Results ===

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Text of a rune span of the buffer.
    pub fn text(&self, start: usize, end: usize) -> String {
        debug_assert!(start <= end && end <= self.len, "span out of bounds");
        self.buf[start..end].iter().collect()
    }

    /// Rune length of the current buffer.
    pub fn buffer_len(&self) -> usize {
        self.len
    }

    // === Shared low-level rules ===

    /// `_ <- MultipleSpace / SingleSpace`. Runs of spaces are tolerated and
    /// reported; preprocessing normally collapses them first.
    pub(crate) fn space(&mut self) -> bool {
        if !self.eat(' ') {
            return false;
        }
        if self.cur() == ' ' {
            self.eat_while(|c| c == ' ');
            self.warn(Warning::SpaceMultiple);
        }
        true
    }

    /// `_?`
    pub(crate) fn opt_space(&mut self) -> bool {
        if self.cur() == ' ' {
            self.space();
        }
        true
    }

    /// `&SpaceCharEOI` — lookahead only, never consumes.
    #[inline]
    pub(crate) fn ahead_space_or_eoi(&self) -> bool {
        self.is_eof() || self.cur() == ' '
    }
}
