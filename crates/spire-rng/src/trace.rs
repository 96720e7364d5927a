//! Draw tracing for hunting desynchronisation against recorded sessions.

use serde::Serialize;

use crate::{Draw, RngError};

/// A single counted draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RngTraceEntry {
    /// Counter value before the draw (0-indexed)
    pub seq: u32,
    /// Draw name (e.g. "bounded_int_inclusive", "bool_chance")
    pub func: &'static str,
    /// Bound or probability argument, rendered for display
    pub arg: String,
    /// Result, rendered for display
    pub result: String,
}

/// Records every counted draw made through it.
#[derive(Debug, Clone)]
pub struct Traced<R> {
    inner: R,
    entries: Vec<RngTraceEntry>,
}

impl<R: Draw> Traced<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[RngTraceEntry] {
        &self.entries
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn record(&mut self, func: &'static str, arg: String, result: String) {
        let seq = self.inner.counter().wrapping_sub(1);
        self.entries.push(RngTraceEntry {
            seq,
            func,
            arg,
            result,
        });
    }

    fn record_result<T: ToString>(
        &mut self,
        func: &'static str,
        arg: String,
        result: Result<T, RngError>,
    ) -> Result<T, RngError> {
        if let Ok(value) = &result {
            self.record(func, arg, value.to_string());
        }
        result
    }
}

impl<R: Draw> Draw for Traced<R> {
    fn counter(&self) -> u32 {
        self.inner.counter()
    }

    fn bounded_int_inclusive(&mut self, n: i32) -> Result<i32, RngError> {
        let r = self.inner.bounded_int_inclusive(n);
        self.record_result("bounded_int_inclusive", n.to_string(), r)
    }

    fn ranged_int_inclusive(&mut self, a: i32, b: i32) -> Result<i32, RngError> {
        let r = self.inner.ranged_int_inclusive(a, b);
        self.record_result("ranged_int_inclusive", format!("{a}..={b}"), r)
    }

    fn long_exclusive(&mut self, n: i64) -> Result<i64, RngError> {
        let r = self.inner.long_exclusive(n);
        self.record_result("long_exclusive", n.to_string(), r)
    }

    fn long_range(&mut self, a: i64, b: i64) -> Result<i64, RngError> {
        let r = self.inner.long_range(a, b);
        self.record_result("long_range", format!("{a}..{b}"), r)
    }

    fn random_long(&mut self) -> i64 {
        let r = self.inner.random_long();
        self.record("random_long", String::new(), r.to_string());
        r
    }

    fn bool(&mut self) -> bool {
        let r = self.inner.bool();
        self.record("bool", String::new(), r.to_string());
        r
    }

    fn bool_chance(&mut self, p: f32) -> bool {
        let r = self.inner.bool_chance(p);
        self.record("bool_chance", p.to_string(), r.to_string());
        r
    }

    fn float01(&mut self) -> f32 {
        let r = self.inner.float01();
        self.record("float01", String::new(), r.to_string());
        r
    }

    fn float_range(&mut self, a: f32, b: f32) -> f32 {
        let r = self.inner.float_range(a, b);
        self.record("float_range", format!("{a}..{b}"), r.to_string());
        r
    }

    fn float_scaled(&mut self, s: f32) -> f32 {
        let r = self.inner.float_scaled(s);
        self.record("float_scaled", s.to_string(), r.to_string());
        r
    }
}

/// Index of the first entry where two traces disagree, if any.
///
/// A trace that is a strict prefix of the other diverges at its length.
pub fn first_divergence(a: &[RngTraceEntry], b: &[RngTraceEntry]) -> Option<usize> {
    let common = a.len().min(b.len());
    for i in 0..common {
        if a[i].func != b[i].func || a[i].arg != b[i].arg || a[i].result != b[i].result {
            return Some(i);
        }
    }
    if a.len() != b.len() {
        Some(common)
    } else {
        None
    }
}
