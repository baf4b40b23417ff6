mod controller;
mod timer;

use std::sync::{Mutex, MutexGuard, PoisonError};

// Public API of the quiz subsystem.
pub use controller::{QuizController, QuizSettings};
pub use timer::CountdownTimer;

// State behind these mutexes stays consistent across a panic, so a poisoned
// lock is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
