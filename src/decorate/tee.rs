//! Observing a call's input and output without altering the result.

use crate::callable::Callable;

/// Side-channel observer of a value.
///
/// Observers only ever see shared references, so they cannot change what
/// the wrapped callable returns. Every `Fn(&T)` is an observer.
pub trait Observer<T: ?Sized> {
    /// Looks at `value`.
    fn observe(&self, value: &T);
}

impl<T: ?Sized, F: Fn(&T)> Observer<T> for F {
    #[inline]
    fn observe(&self, value: &T) {
        self(value);
    }
}

/// The observer that does nothing; the default for both tee slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Silent;

impl<T: ?Sized> Observer<T> for Silent {
    #[inline]
    fn observe(&self, _value: &T) {}
}

/// Callable that shows each input to `on_input`, delegates, and shows each
/// successful output to `on_output`.
///
/// The value returned is exactly the inner callable's. `on_output` only runs
/// when the inner call succeeds; a failure is never shown to it and
/// propagates unchanged.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::decorate::Tee;
/// use std::cell::RefCell;
///
/// let seen = RefCell::new(Vec::new());
/// let traced = Tee::new(|value: i32| Ok::<_, ()>(value * value))
///     .on_input(|input: &i32| seen.borrow_mut().push(format!("in {input}")))
///     .on_output(|output: &i32| seen.borrow_mut().push(format!("out {output}")));
///
/// assert_eq!(traced.invoke(7), Ok(49));
/// assert_eq!(*seen.borrow(), vec!["in 7", "out 49"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tee<F, I = Silent, O = Silent> {
    inner: F,
    on_input: I,
    on_output: O,
}

impl<F> Tee<F> {
    /// Wraps `inner` with no observers attached.
    pub const fn new(inner: F) -> Self {
        Self {
            inner,
            on_input: Silent,
            on_output: Silent,
        }
    }
}

impl<F, I, O> Tee<F, I, O> {
    /// Replaces the input observer.
    pub fn on_input<J>(self, observer: J) -> Tee<F, J, O> {
        Tee {
            inner: self.inner,
            on_input: observer,
            on_output: self.on_output,
        }
    }

    /// Replaces the output observer.
    pub fn on_output<P>(self, observer: P) -> Tee<F, I, P> {
        Tee {
            inner: self.inner,
            on_input: self.on_input,
            on_output: observer,
        }
    }
}

impl<A, F, I, O> Callable<A> for Tee<F, I, O>
where
    F: Callable<A>,
    I: Observer<A>,
    O: Observer<F::Output>,
{
    type Output = F::Output;
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<F::Output, F::Error> {
        self.on_input.observe(&input);
        let output = self.inner.invoke(input)?;
        self.on_output.observe(&output);
        Ok(output)
    }
}

/// Wraps `inner` so `on_input` sees every input and `on_output` every
/// successful output.
pub const fn tee<F, I, O>(inner: F, on_input: I, on_output: O) -> Tee<F, I, O> {
    Tee {
        inner,
        on_input,
        on_output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_input_is_observed_before_inner_runs() {
        let events = RefCell::new(Vec::new());
        let inner = |value: u8| {
            events.borrow_mut().push("inner");
            Ok::<_, ()>(value)
        };
        let traced = tee(
            inner,
            |_: &u8| events.borrow_mut().push("input"),
            |_: &u8| events.borrow_mut().push("output"),
        );

        traced.invoke(1).unwrap();
        assert_eq!(*events.borrow(), vec!["input", "inner", "output"]);
    }

    #[test]
    fn test_failure_skips_output_observer() {
        let outputs = RefCell::new(0);
        let traced = Tee::new(|_: u8| Err::<u8, &str>("bad"))
            .on_output(|_: &u8| *outputs.borrow_mut() += 1);
        assert_eq!(traced.invoke(1), Err("bad"));
        assert_eq!(*outputs.borrow(), 0);
    }

    #[test]
    fn test_silent_tee_is_transparent() {
        let traced = Tee::new(|text: String| Ok::<_, ()>(text.to_uppercase()));
        assert_eq!(traced.invoke("abc".to_string()), Ok("ABC".to_string()));
    }
}
