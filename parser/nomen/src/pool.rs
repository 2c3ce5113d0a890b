//! The engine pool.
//!
//! Engines own per-parse buffers and token arrays; reusing them across
//! calls keeps allocations warm. The pool is the only shared mutable
//! resource of the facade: a mutex-guarded stack of engines, sized once at
//! construction.

use parking_lot::Mutex;

use nomen_parse::Engine;

pub(crate) struct EnginePool {
    engines: Mutex<Vec<Engine>>,
    capacity: usize,
    disable_cultivars: bool,
}

impl EnginePool {
    /// Create a pool of `capacity` engines, all built up front.
    pub(crate) fn new(capacity: usize, disable_cultivars: bool) -> Self {
        let engines = (0..capacity)
            .map(|_| Self::build_engine(disable_cultivars))
            .collect();
        EnginePool {
            engines: Mutex::new(engines),
            capacity,
            disable_cultivars,
        }
    }

    fn build_engine(disable_cultivars: bool) -> Engine {
        let mut engine = Engine::new();
        if disable_cultivars {
            engine.disable_cultivars();
        }
        engine
    }

    /// Take an engine. Falls back to a fresh engine if callers outnumber
    /// the pool, so checkout never blocks a parse.
    pub(crate) fn checkout(&self) -> Engine {
        self.engines
            .lock()
            .pop()
            .unwrap_or_else(|| Self::build_engine(self.disable_cultivars))
    }

    /// Return an engine; excess engines beyond capacity are dropped.
    pub(crate) fn put_back(&self, engine: Engine) {
        let mut engines = self.engines.lock();
        if engines.len() < self.capacity {
            engines.push(engine);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_and_return() {
        let pool = EnginePool::new(2, false);
        let a = pool.checkout();
        let b = pool.checkout();
        // Pool exhausted; a transient engine still works.
        let c = pool.checkout();
        pool.put_back(a);
        pool.put_back(b);
        pool.put_back(c);
        assert_eq!(pool.engines.lock().len(), 2);
    }
}
