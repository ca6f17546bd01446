//! Generator algebra: a generator is a pure function from a [`RandomState`]
//! to a value and the next state.
//!
//! [`Generator::map`] and [`Generator::flat_map`] give the functor and monad
//! structure. [`map2`] is the applicative primitive; wider combinations pair
//! generators with [`product`] and re-flatten the tuples, so every combinator
//! threads the state through its inputs strictly left to right.

use std::fmt;
use std::sync::Arc;

use crate::rng::RandomState;

type SampleFn<A> = dyn Fn(RandomState) -> (A, RandomState) + Send + Sync;

/// A pure, reentrant source of values of type `A`
pub struct Generator<A> {
    sample: Arc<SampleFn<A>>,
}

impl<A> Clone for Generator<A> {
    fn clone(&self) -> Self {
        Self {
            sample: Arc::clone(&self.sample),
        }
    }
}

impl<A> fmt::Debug for Generator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("output", &std::any::type_name::<A>())
            .finish()
    }
}

impl<A: 'static> Generator<A> {
    /// Wrap a state-passing function as a generator
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(RandomState) -> (A, RandomState) + Send + Sync + 'static,
    {
        Self {
            sample: Arc::new(f),
        }
    }

    /// A generator that always yields `value` and hands the state on untouched
    pub fn pure(value: A) -> Self
    where
        A: Clone + Send + Sync,
    {
        Self::new(move |state| (value.clone(), state))
    }

    /// Run the generator against `state`
    pub fn sample(&self, state: RandomState) -> (A, RandomState) {
        (self.sample)(state)
    }

    /// Draw `n` successive values, threading the state between draws
    pub fn sample_n(&self, n: usize, state: RandomState) -> (Vec<A>, RandomState) {
        let mut values = Vec::with_capacity(n);
        let mut state = state;
        for _ in 0..n {
            let (value, next) = self.sample(state);
            values.push(value);
            state = next;
        }
        (values, state)
    }

    pub fn map<B, F>(self, f: F) -> Generator<B>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Generator::new(move |state| {
            let (a, state) = self.sample(state);
            (f(a), state)
        })
    }

    /// Feed this generator's output to `f` and run the generator it returns
    /// against the advanced state
    pub fn flat_map<B, F>(self, f: F) -> Generator<B>
    where
        B: 'static,
        F: Fn(A) -> Generator<B> + Send + Sync + 'static,
    {
        Generator::new(move |state| {
            let (a, state) = self.sample(state);
            f(a).sample(state)
        })
    }

    pub fn product<B: 'static>(self, other: Generator<B>) -> Generator<(A, B)> {
        product(self, other)
    }
}

/// Free-function form of [`Generator::pure`]
pub fn pure<A>(value: A) -> Generator<A>
where
    A: Clone + Send + Sync + 'static,
{
    Generator::pure(value)
}

/// Free-function form of [`Generator::map`]
pub fn map<A, B, F>(generator: Generator<A>, f: F) -> Generator<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    generator.map(f)
}

/// Free-function form of [`Generator::flat_map`]
pub fn flat_map<A, B, F>(generator: Generator<A>, f: F) -> Generator<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> Generator<B> + Send + Sync + 'static,
{
    generator.flat_map(f)
}

/// Run `ga` then `gb` and combine their outputs with `f`.
///
/// Unlike [`flat_map`], `f` cannot influence which generators run.
pub fn map2<A, B, C, F>(ga: Generator<A>, gb: Generator<B>, f: F) -> Generator<C>
where
    A: 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + Send + Sync + 'static,
{
    Generator::new(move |state| {
        let (a, state) = ga.sample(state);
        let (b, state) = gb.sample(state);
        (f(a, b), state)
    })
}

pub fn product<A, B>(ga: Generator<A>, gb: Generator<B>) -> Generator<(A, B)>
where
    A: 'static,
    B: 'static,
{
    map2(ga, gb, |a, b| (a, b))
}

pub fn map3<T1, T2, T3, Z, F>(
    g1: Generator<T1>,
    g2: Generator<T2>,
    g3: Generator<T3>,
    f: F,
) -> Generator<Z>
where
    T1: 'static,
    T2: 'static,
    T3: 'static,
    Z: 'static,
    F: Fn(T1, T2, T3) -> Z + Send + Sync + 'static,
{
    map2(product(g1, g2), g3, move |(v1, v2), v3| f(v1, v2, v3))
}

pub fn map4<T1, T2, T3, T4, Z, F>(
    g1: Generator<T1>,
    g2: Generator<T2>,
    g3: Generator<T3>,
    g4: Generator<T4>,
    f: F,
) -> Generator<Z>
where
    T1: 'static,
    T2: 'static,
    T3: 'static,
    T4: 'static,
    Z: 'static,
    F: Fn(T1, T2, T3, T4) -> Z + Send + Sync + 'static,
{
    map2(product(g1, g2), product(g3, g4), move |(v1, v2), (v3, v4)| {
        f(v1, v2, v3, v4)
    })
}

pub fn map8<T1, T2, T3, T4, T5, T6, T7, T8, Z, F>(
    g1: Generator<T1>,
    g2: Generator<T2>,
    g3: Generator<T3>,
    g4: Generator<T4>,
    g5: Generator<T5>,
    g6: Generator<T6>,
    g7: Generator<T7>,
    g8: Generator<T8>,
    f: F,
) -> Generator<Z>
where
    T1: 'static,
    T2: 'static,
    T3: 'static,
    T4: 'static,
    T5: 'static,
    T6: 'static,
    T7: 'static,
    T8: 'static,
    Z: 'static,
    F: Fn(T1, T2, T3, T4, T5, T6, T7, T8) -> Z + Send + Sync + 'static,
{
    map4(
        product(g1, g2),
        product(g3, g4),
        product(g5, g6),
        product(g7, g8),
        move |(v1, v2), (v3, v4), (v5, v6), (v7, v8)| f(v1, v2, v3, v4, v5, v6, v7, v8),
    )
}

/// Combine 16 independent generators, paired into 8 products fed to [`map8`]
pub fn map16<
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
    T9,
    T10,
    T11,
    T12,
    T13,
    T14,
    T15,
    T16,
    Z,
    F,
>(
    g1: Generator<T1>,
    g2: Generator<T2>,
    g3: Generator<T3>,
    g4: Generator<T4>,
    g5: Generator<T5>,
    g6: Generator<T6>,
    g7: Generator<T7>,
    g8: Generator<T8>,
    g9: Generator<T9>,
    g10: Generator<T10>,
    g11: Generator<T11>,
    g12: Generator<T12>,
    g13: Generator<T13>,
    g14: Generator<T14>,
    g15: Generator<T15>,
    g16: Generator<T16>,
    f: F,
) -> Generator<Z>
where
    T1: 'static,
    T2: 'static,
    T3: 'static,
    T4: 'static,
    T5: 'static,
    T6: 'static,
    T7: 'static,
    T8: 'static,
    T9: 'static,
    T10: 'static,
    T11: 'static,
    T12: 'static,
    T13: 'static,
    T14: 'static,
    T15: 'static,
    T16: 'static,
    Z: 'static,
    F: Fn(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15, T16) -> Z
        + Send
        + Sync
        + 'static,
{
    map8(
        product(g1, g2),
        product(g3, g4),
        product(g5, g6),
        product(g7, g8),
        product(g9, g10),
        product(g11, g12),
        product(g13, g14),
        product(g15, g16),
        move |p1, p2, p3, p4, p5, p6, p7, p8| {
            let ((v1, v2), (v3, v4), (v5, v6), (v7, v8)) = (p1, p2, p3, p4);
            let ((v9, v10), (v11, v12), (v13, v14), (v15, v16)) = (p5, p6, p7, p8);
            f(v1, v2, v3, v4, v5, v6, v7, v8, v9, v10, v11, v12, v13, v14, v15, v16)
        },
    )
}

/// Combine 32 independent generators, paired into 16 products fed to [`map16`]
pub fn map32<
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
    T9,
    T10,
    T11,
    T12,
    T13,
    T14,
    T15,
    T16,
    T17,
    T18,
    T19,
    T20,
    T21,
    T22,
    T23,
    T24,
    T25,
    T26,
    T27,
    T28,
    T29,
    T30,
    T31,
    T32,
    Z,
    F,
>(
    g1: Generator<T1>,
    g2: Generator<T2>,
    g3: Generator<T3>,
    g4: Generator<T4>,
    g5: Generator<T5>,
    g6: Generator<T6>,
    g7: Generator<T7>,
    g8: Generator<T8>,
    g9: Generator<T9>,
    g10: Generator<T10>,
    g11: Generator<T11>,
    g12: Generator<T12>,
    g13: Generator<T13>,
    g14: Generator<T14>,
    g15: Generator<T15>,
    g16: Generator<T16>,
    g17: Generator<T17>,
    g18: Generator<T18>,
    g19: Generator<T19>,
    g20: Generator<T20>,
    g21: Generator<T21>,
    g22: Generator<T22>,
    g23: Generator<T23>,
    g24: Generator<T24>,
    g25: Generator<T25>,
    g26: Generator<T26>,
    g27: Generator<T27>,
    g28: Generator<T28>,
    g29: Generator<T29>,
    g30: Generator<T30>,
    g31: Generator<T31>,
    g32: Generator<T32>,
    f: F,
) -> Generator<Z>
where
    T1: 'static,
    T2: 'static,
    T3: 'static,
    T4: 'static,
    T5: 'static,
    T6: 'static,
    T7: 'static,
    T8: 'static,
    T9: 'static,
    T10: 'static,
    T11: 'static,
    T12: 'static,
    T13: 'static,
    T14: 'static,
    T15: 'static,
    T16: 'static,
    T17: 'static,
    T18: 'static,
    T19: 'static,
    T20: 'static,
    T21: 'static,
    T22: 'static,
    T23: 'static,
    T24: 'static,
    T25: 'static,
    T26: 'static,
    T27: 'static,
    T28: 'static,
    T29: 'static,
    T30: 'static,
    T31: 'static,
    T32: 'static,
    Z: 'static,
    F: Fn(
            T1,
            T2,
            T3,
            T4,
            T5,
            T6,
            T7,
            T8,
            T9,
            T10,
            T11,
            T12,
            T13,
            T14,
            T15,
            T16,
            T17,
            T18,
            T19,
            T20,
            T21,
            T22,
            T23,
            T24,
            T25,
            T26,
            T27,
            T28,
            T29,
            T30,
            T31,
            T32,
        ) -> Z
        + Send
        + Sync
        + 'static,
{
    map16(
        product(g1, g2),
        product(g3, g4),
        product(g5, g6),
        product(g7, g8),
        product(g9, g10),
        product(g11, g12),
        product(g13, g14),
        product(g15, g16),
        product(g17, g18),
        product(g19, g20),
        product(g21, g22),
        product(g23, g24),
        product(g25, g26),
        product(g27, g28),
        product(g29, g30),
        product(g31, g32),
        move |p1, p2, p3, p4, p5, p6, p7, p8, p9, p10, p11, p12, p13, p14, p15, p16| {
            let ((v1, v2), (v3, v4), (v5, v6), (v7, v8)) = (p1, p2, p3, p4);
            let ((v9, v10), (v11, v12), (v13, v14), (v15, v16)) = (p5, p6, p7, p8);
            let ((v17, v18), (v19, v20), (v21, v22), (v23, v24)) = (p9, p10, p11, p12);
            let ((v25, v26), (v27, v28), (v29, v30), (v31, v32)) = (p13, p14, p15, p16);
            f(
                v1,
                v2,
                v3,
                v4,
                v5,
                v6,
                v7,
                v8,
                v9,
                v10,
                v11,
                v12,
                v13,
                v14,
                v15,
                v16,
                v17,
                v18,
                v19,
                v20,
                v21,
                v22,
                v23,
                v24,
                v25,
                v26,
                v27,
                v28,
                v29,
                v30,
                v31,
                v32,
            )
        },
    )
}

/// Threads a tuple of generators, of arity 2 through 32, into one generator
/// of the tuple of their outputs
pub trait Zip {
    type Output: 'static;

    fn zip(self) -> Generator<Self::Output>;
}

macro_rules! impl_zip {
    (@impl $($g:ident: $t:ident),+) => {
        impl<$($t: 'static),+> Zip for ($(Generator<$t>,)+) {
            type Output = ($($t,)+);

            fn zip(self) -> Generator<Self::Output> {
                let ($($g,)+) = self;
                Generator::new(move |state| {
                    $(let ($g, state) = $g.sample(state);)+
                    (($($g,)+), state)
                })
            }
        }
    };
    ($g:ident: $t:ident) => {};
    ($g:ident: $t:ident, $($rest_g:ident: $rest_t:ident),+) => {
        impl_zip!(@impl $g: $t, $($rest_g: $rest_t),+);
        impl_zip!($($rest_g: $rest_t),+);
    };
}

// One impl per suffix of the list, covering arities 32 down to 2
impl_zip!(
    g1: T1, g2: T2, g3: T3, g4: T4, g5: T5, g6: T6, g7: T7, g8: T8, g9: T9, g10: T10, g11: T11,
    g12: T12, g13: T13, g14: T14, g15: T15, g16: T16, g17: T17, g18: T18, g19: T19, g20: T20,
    g21: T21, g22: T22, g23: T23, g24: T24, g25: T25, g26: T26, g27: T27, g28: T28, g29: T29,
    g30: T30, g31: T31, g32: T32
);

/// Combine a tuple of generators into a generator of tuples
pub fn zip_n<Z: Zip>(generators: Z) -> Generator<Z::Output> {
    generators.zip()
}

/// Combine a tuple of generators and reshape the tuple of outputs with `f`
pub fn map_n<Z, B, F>(generators: Z, f: F) -> Generator<B>
where
    Z: Zip,
    B: 'static,
    F: Fn(Z::Output) -> B + Send + Sync + 'static,
{
    generators.zip().map(f)
}

/// Run every generator in order and collect their outputs.
///
/// Equivalent to folding the list with [`map2`] and an appending accumulator,
/// starting from `pure(vec![])`.
pub fn sequence<A: 'static>(generators: Vec<Generator<A>>) -> Generator<Vec<A>> {
    Generator::new(move |state| {
        let mut values = Vec::with_capacity(generators.len());
        let mut state = state;
        for generator in &generators {
            let (value, next) = generator.sample(state);
            values.push(value);
            state = next;
        }
        (values, state)
    })
}
