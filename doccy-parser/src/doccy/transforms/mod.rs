//! Transform pipeline infrastructure
//!
//! A composable, type-safe way of chaining processing stages. Any transform can be chained
//! with another if their types line up, so the CLI, the loader and the tests all build
//! their pipelines from the same parts.
//!
//! # The `Runnable` Trait
//!
//! The interface every stage implements: transform input of type `I` into output of
//! type `O`. Stages cannot fail; malformed markup degrades to text and lossy recoveries
//! are recorded as diagnostics on the document instead.
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> O;
//! }
//! ```
//!
//! # The `Transform<I, O>` Type
//!
//! A wrapper that enables composition. `.then()` appends a stage and the compiler checks
//! that each stage's input is the previous stage's output:
//!
//! ```rust,ignore
//! let pipeline = Transform::identity()
//!     .then(Parsing::new())            // String → Document
//!     .then(WrapFloatingText::new());  // Document → Document
//! ```
//!
//! # Standard Transforms
//!
//! The common pipelines are prebuilt as `once_cell::sync::Lazy` statics, see [standard]:
//!
//! ```rust,ignore
//! use doccy_parser::doccy::transforms::standard::STRING_TO_DOCUMENT;
//!
//! let doc = STRING_TO_DOCUMENT.run("{p: Hello}".to_string());
//! ```
//!
//! # Module Organization
//!
//! - [`stages`]: parsing and the two prettification passes
//! - [`standard`]: prebuilt pipelines, and [`standard::pipeline`] for arbitrary options

pub mod stages;
pub mod standard;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> O;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> O + Send + Sync>,
}

impl<I: 'static> Transform<I, I> {
    /// The empty pipeline, a starting point for chaining stages.
    pub fn identity() -> Self {
        Transform::from_fn(|input| input)
    }
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform, returning a transform from `I` to the stage's
    /// output.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| stage.run(prev_run(input))),
        }
    }

    /// Chain a prebuilt static transform after this one.
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| next.run(prev_run(input))),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> O {
        (self.run_fn)(input)
    }
}

// Transforms can be used as stages of other transforms
impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> O {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DoubleNumber;
    impl Runnable<i32, i32> for DoubleNumber {
        fn run(&self, input: i32) -> i32 {
            input * 2
        }
    }

    struct AddTen;
    impl Runnable<i32, i32> for AddTen {
        fn run(&self, input: i32) -> i32 {
            input + 10
        }
    }

    struct IntToString;
    impl Runnable<i32, String> for IntToString {
        fn run(&self, input: i32) -> String {
            input.to_string()
        }
    }

    static TO_STRING: once_cell::sync::Lazy<Transform<i32, String>> =
        once_cell::sync::Lazy::new(|| Transform::identity().then(IntToString));

    #[test]
    fn test_stages_run_in_order() {
        let transform = Transform::<i32, i32>::identity()
            .then(DoubleNumber)
            .then(AddTen)
            .then(DoubleNumber);

        // (5 * 2) + 10 = 20, then 20 * 2 = 40
        assert_eq!(transform.run(5), 40);
    }

    #[test]
    fn test_type_changing_stage() {
        let transform = Transform::from_fn(|x: i32| x + 1)
            .then(DoubleNumber)
            .then(IntToString);

        assert_eq!(transform.run(4), "10");
    }

    #[test]
    fn test_static_transform_as_stage() {
        let transform = Transform::<i32, i32>::identity()
            .then(AddTen)
            .then_transform(&*TO_STRING);
        assert_eq!(transform.run(1), "11");
    }

    #[test]
    fn test_identity() {
        assert_eq!(Transform::<&str, &str>::identity().run("same"), "same");
    }
}
