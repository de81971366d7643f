//! Practice exercises: generation and grading.
//!
//! Every generator takes the random number generator to draw from, so a session seeded with
//! [`seeded`] produces the same sequence of exercises every time.

use crate::{
    equivalence::equivalent,
    error::{DomainError, Error, GradingError},
    expand::expand_polynomials,
    pascal::choose,
    primitive::{int, rat},
    symbolic::{power_polynomial, Expression, Monomial, Polynomial, Symbol},
};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rug::{ops::Pow, Integer};
use std::{fmt, ops::RangeInclusive};

/// Creates a deterministic random number generator from a seed.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The variable used by every generated exercise.
fn x() -> Symbol {
    Symbol::new("x")
}

/// Writes `(a*x + b)^n` the way it is shown to students.
fn linear_binomial(a: i64, b: i64, n: u32) -> String {
    let linear = Polynomial::from_terms([
        (Monomial::symbol(x()), rat(a)),
        (Monomial::one(), rat(b)),
    ]);
    format!("({})^{}", linear, n)
}

/// Expands `(a*x + b)^n`.
fn expand_linear(a: i64, b: i64, n: u32) -> Result<Polynomial, DomainError> {
    let linear = Polynomial::from_terms([(Monomial::symbol(x()), rat(a))]);
    expand_polynomials(&linear, &Polynomial::constant(rat(b)), n, &mut ())
}

/// Expand `(a*x + b)^n` and type in the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionExercise {
    pub a: i64,
    pub b: i64,
    pub n: u32,
    answer: Polynomial,
}

impl ExpansionExercise {
    /// The range `a` and `b` are drawn from.
    pub const COEFFICIENTS: RangeInclusive<i64> = 1..=5;

    /// The range `n` is drawn from.
    pub const EXPONENTS: RangeInclusive<u32> = 2..=4;

    /// Creates the exercise for `(a*x + b)^n`.
    pub fn new(a: i64, b: i64, n: u32) -> Result<Self, DomainError> {
        Ok(Self { a, b, n, answer: expand_linear(a, b, n)? })
    }

    /// Draws a random exercise.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, DomainError> {
        let a = rng.gen_range(Self::COEFFICIENTS);
        let b = rng.gen_range(Self::COEFFICIENTS);
        let n = rng.gen_range(Self::EXPONENTS);
        debug!("generated expansion exercise a = {}, b = {}, n = {}", a, b, n);
        Self::new(a, b, n)
    }

    /// The binomial to expand.
    pub fn binomial(&self) -> String {
        linear_binomial(self.a, self.b, self.n)
    }

    /// The expected expansion.
    pub fn answer(&self) -> &Polynomial {
        &self.answer
    }

    /// Grades an answer. Any form that normalizes to the expansion is accepted.
    pub fn check(&self, answer: &str) -> Result<bool, GradingError> {
        equivalent(&self.answer, answer)
    }
}

impl fmt::Display for ExpansionExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expand {}", self.binomial())
    }
}

/// Find the coefficient of `x^(n-k)` in the expansion of `(a*x + b)^n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientExercise {
    pub a: i64,
    pub b: i64,
    pub n: u32,
    pub k: u32,
    answer: Integer,
}

impl CoefficientExercise {
    /// The range `a` and `b` are drawn from.
    pub const COEFFICIENTS: RangeInclusive<i64> = 1..=5;

    /// The range `n` is drawn from. `k` is then drawn from `1..=n-1`.
    pub const EXPONENTS: RangeInclusive<u32> = 4..=6;

    /// Creates the exercise asking for term `k` of `(a*x + b)^n`.
    pub fn new(a: i64, b: i64, n: u32, k: u32) -> Result<Self, DomainError> {
        let coefficient = choose(i64::from(n), i64::from(k))?;
        let answer = coefficient * int(int(a).pow(n - k)) * int(int(b).pow(k));
        Ok(Self { a, b, n, k, answer })
    }

    /// Draws a random exercise.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, DomainError> {
        let a = rng.gen_range(Self::COEFFICIENTS);
        let b = rng.gen_range(Self::COEFFICIENTS);
        let n = rng.gen_range(Self::EXPONENTS);
        let k = rng.gen_range(1..n);
        debug!("generated coefficient exercise a = {}, b = {}, n = {}, k = {}", a, b, n, k);
        Self::new(a, b, n, k)
    }

    /// The power of `x` whose coefficient is asked for.
    pub fn power(&self) -> u32 {
        self.n - self.k
    }

    /// The expected coefficient, `C(n, k) * a^(n-k) * b^k`.
    pub fn answer(&self) -> &Integer {
        &self.answer
    }

    /// Grades an answer.
    pub fn check(&self, answer: &Integer) -> bool {
        *answer == self.answer
    }

    /// The worked solution, such as `C(4, 1) * 2^3 * 3^1 = 96`.
    pub fn solution(&self) -> String {
        format!(
            "C({}, {}) * {}^{} * {}^{} = {}",
            self.n, self.k, self.a, self.power(), self.b, self.k, self.answer,
        )
    }
}

impl fmt::Display for CoefficientExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "What is the coefficient of x^{} in the expansion of {}?",
            self.power(),
            linear_binomial(self.a, self.b, self.n),
        )
    }
}

/// How hard an identification exercise is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// `a` and `b` from 1 to 5, squared.
    Level1,

    /// `a` and `b` from 1 to 10, cubed.
    Level2,

    /// `a` and `b` from 1 to 15, to the fourth power.
    Level3,
}

impl Difficulty {
    /// Every difficulty, from easiest to hardest.
    pub const ALL: [Difficulty; 3] = [Difficulty::Level1, Difficulty::Level2, Difficulty::Level3];

    /// The difficulty with the given level number, from 1 to 3.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Level1),
            2 => Some(Self::Level2),
            3 => Some(Self::Level3),
            _ => None,
        }
    }

    /// The range `a` and `b` are drawn from.
    pub fn coefficients(self) -> RangeInclusive<i64> {
        match self {
            Self::Level1 => 1..=5,
            Self::Level2 => 1..=10,
            Self::Level3 => 1..=15,
        }
    }

    /// The exponent of the binomial.
    pub fn exponent(self) -> u32 {
        match self {
            Self::Level1 => 2,
            Self::Level2 => 3,
            Self::Level3 => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level1 => write!(f, "level 1"),
            Self::Level2 => write!(f, "level 2"),
            Self::Level3 => write!(f, "level 3"),
        }
    }
}

/// Given the expansion of `(a*x + b)^n`, find `a`, `b` and `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationExercise {
    pub difficulty: Difficulty,
    pub a: i64,
    pub b: i64,
    pub n: u32,
    expanded: Polynomial,
}

impl IdentificationExercise {
    /// Creates the exercise for `(a*x + b)^n`, with `n` set by the difficulty.
    pub fn new(difficulty: Difficulty, a: i64, b: i64) -> Result<Self, DomainError> {
        let n = difficulty.exponent();
        Ok(Self {
            difficulty,
            a,
            b,
            n,
            expanded: expand_linear(a, b, n)?,
        })
    }

    /// Draws a random exercise of the given difficulty.
    pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Result<Self, DomainError> {
        let a = rng.gen_range(difficulty.coefficients());
        let b = rng.gen_range(difficulty.coefficients());
        debug!("generated {} identification exercise a = {}, b = {}", difficulty, a, b);
        Self::new(difficulty, a, b)
    }

    /// The expanded polynomial shown to the student.
    pub fn expanded(&self) -> &Polynomial {
        &self.expanded
    }

    /// The binomial that was expanded.
    pub fn binomial(&self) -> String {
        linear_binomial(self.a, self.b, self.n)
    }

    /// Grades an answer. Only the exact `a`, `b` and `n` are accepted.
    pub fn check(&self, a: i64, b: i64, n: u32) -> bool {
        (a, b, n) == (self.a, self.b, self.n)
    }
}

impl fmt::Display for IdentificationExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Find a, b and n such that (a*x + b)^n = {}", self.expanded)
    }
}

/// Given the expansion of one of a fixed set of binomials, write down the binomial and exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetIdentification {
    /// The binomial that was expanded, as text.
    pub binomial: &'static str,

    /// The exponent it was raised to.
    pub exponent: u32,

    expanded: Polynomial,
}

impl PresetIdentification {
    /// The largest exponent an answer may give.
    pub const MAX_EXPONENT: u32 = 5;

    /// The binomials and exponents the exercise is drawn from.
    pub const PRESETS: [(&'static str, u32); 5] = [
        ("x + 1", 2),
        ("x - 2", 3),
        ("2*x + 3", 2),
        ("3*x - 1", 3),
        ("x + y", 2),
    ];

    /// Creates the exercise for the preset at the given index.
    pub fn from_preset(index: usize) -> Result<Self, Error> {
        let (binomial, exponent) = Self::PRESETS.get(index).copied().ok_or_else(|| {
            DomainError::new(
                "preset",
                index,
                format!("must be less than {}", Self::PRESETS.len()),
            )
        })?;

        let base = Expression::parse(binomial)?.normalize()?;
        Ok(Self {
            binomial,
            exponent,
            expanded: power_polynomial(&base, exponent)?,
        })
    }

    /// Draws a random preset.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        Self::from_preset(rng.gen_range(0..Self::PRESETS.len()))
    }

    /// The expanded polynomial shown to the student.
    pub fn expanded(&self) -> &Polynomial {
        &self.expanded
    }

    /// Grades an answer by expanding the student's binomial, so any equivalent way of writing it
    /// is accepted: `1 + x` with exponent 2 is correct for `(x + 1)^2`.
    ///
    /// An exponent below 1 is wrong; one above [`Self::MAX_EXPONENT`] cannot be graded.
    pub fn check(&self, binomial: &str, exponent: i64) -> Result<bool, GradingError> {
        let grading_error = |source: binom_error::Error| GradingError {
            answer: binomial.to_owned(),
            source,
        };

        if exponent < 1 {
            return Ok(false);
        }
        let exponent = u32::try_from(exponent)
            .ok()
            .filter(|&n| n <= Self::MAX_EXPONENT)
            .ok_or_else(|| grading_error(binom_error::Error::new(Vec::new(), DomainError::new(
                "exponent",
                exponent,
                format!("must be between 1 and {}", Self::MAX_EXPONENT),
            ))))?;
        let base = Expression::parse(binomial)
            .map_err(|err| grading_error(err.into_spanned()))?
            .normalize()
            .map_err(|err| grading_error(binom_error::Error::new(Vec::new(), err)))?;
        let guess = power_polynomial(&base, exponent)
            .map_err(|err| grading_error(binom_error::Error::new(Vec::new(), err)))?;
        Ok(guess == self.expanded)
    }
}

impl fmt::Display for PresetIdentification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Which binomial power expands to {}?", self.expanded)
    }
}

/// A property to aim for while experimenting with `(a*x + b)^n` in the plotting lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabChallenge {
    ThreeRealRoots,
    AlwaysPositive,
    InflectionPoint,
    SymmetricAboutYAxis,
}

impl LabChallenge {
    /// Every challenge.
    pub const ALL: [LabChallenge; 4] = [
        LabChallenge::ThreeRealRoots,
        LabChallenge::AlwaysPositive,
        LabChallenge::InflectionPoint,
        LabChallenge::SymmetricAboutYAxis,
    ];

    /// Draws a random challenge.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// What the plotted function should do.
    pub fn description(self) -> &'static str {
        match self {
            Self::ThreeRealRoots => "has three real roots",
            Self::AlwaysPositive => "is always positive",
            Self::InflectionPoint => "has an inflection point",
            Self::SymmetricAboutYAxis => "is symmetric about the y axis",
        }
    }
}

impl fmt::Display for LabChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Adjust the parameters to create a function that {}.", self.description())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn same_seed_same_exercises() {
        let mut first = seeded(42);
        let mut second = seeded(42);
        for _ in 0..20 {
            assert_eq!(
                ExpansionExercise::generate(&mut first).unwrap(),
                ExpansionExercise::generate(&mut second).unwrap(),
            );
            assert_eq!(
                CoefficientExercise::generate(&mut first).unwrap(),
                CoefficientExercise::generate(&mut second).unwrap(),
            );
        }
    }

    #[test]
    fn generated_values_stay_in_range() {
        let mut rng = seeded(7);
        for _ in 0..200 {
            let exercise = ExpansionExercise::generate(&mut rng).unwrap();
            assert!(ExpansionExercise::COEFFICIENTS.contains(&exercise.a));
            assert!(ExpansionExercise::COEFFICIENTS.contains(&exercise.b));
            assert!(ExpansionExercise::EXPONENTS.contains(&exercise.n));

            let exercise = CoefficientExercise::generate(&mut rng).unwrap();
            assert!(CoefficientExercise::EXPONENTS.contains(&exercise.n));
            assert!(exercise.k >= 1 && exercise.k < exercise.n);

            for difficulty in Difficulty::ALL {
                let exercise = IdentificationExercise::generate(difficulty, &mut rng).unwrap();
                assert!(difficulty.coefficients().contains(&exercise.a));
                assert!(difficulty.coefficients().contains(&exercise.b));
                assert_eq!(exercise.n, difficulty.exponent());
            }
        }
    }

    #[test]
    fn expansion_exercise_grading() {
        let exercise = ExpansionExercise::new(2, 3, 2).unwrap();
        assert_eq!(exercise.binomial(), "(2*x + 3)^2");
        assert_eq!(exercise.to_string(), "Expand (2*x + 3)^2");
        assert_eq!(exercise.answer().to_string(), "4*x^2 + 12*x + 9");
        assert!(exercise.check("4*x^2 + 12*x + 9").unwrap());
        assert!(exercise.check("9 + 12*x + 4*x**2").unwrap());
        assert!(!exercise.check("4*x^2 + 6*x + 9").unwrap());
        assert!(exercise.check("4x^2 + 12x + 9").is_err());
    }

    #[test]
    fn coefficient_exercise_answer() {
        let exercise = CoefficientExercise::new(2, 3, 4, 1).unwrap();
        assert_eq!(exercise.power(), 3);
        assert_eq!(*exercise.answer(), 96);
        assert!(exercise.check(&int(96)));
        assert!(!exercise.check(&int(24)));
        assert_eq!(exercise.solution(), "C(4, 1) * 2^3 * 3^1 = 96");
        assert_eq!(
            exercise.to_string(),
            "What is the coefficient of x^3 in the expansion of (2*x + 3)^4?",
        );
    }

    #[test]
    fn coefficient_matches_expansion() {
        let exercise = CoefficientExercise::new(3, 5, 6, 2).unwrap();
        let expanded = expand_linear(3, 5, 6).unwrap();
        let term = Monomial::from_powers([(x(), exercise.power())]);
        assert_eq!(expanded.coefficient(&term), rat(exercise.answer()));
    }

    #[test]
    fn identification_exercise_grading() {
        let exercise = IdentificationExercise::new(Difficulty::Level2, 2, 5).unwrap();
        assert_eq!(exercise.expanded().to_string(), "8*x^3 + 60*x^2 + 150*x + 125");
        assert!(exercise.check(2, 5, 3));
        assert!(!exercise.check(5, 2, 3));
        assert!(!exercise.check(2, 5, 2));
    }

    #[test]
    fn difficulty_levels() {
        assert_eq!(Difficulty::from_level(1), Some(Difficulty::Level1));
        assert_eq!(Difficulty::from_level(3), Some(Difficulty::Level3));
        assert_eq!(Difficulty::from_level(4), None);
        assert_eq!(Difficulty::Level3.coefficients(), 1..=15);
    }

    #[test]
    fn preset_identification() {
        let exercise = PresetIdentification::from_preset(1).unwrap();
        assert_eq!(exercise.expanded().to_string(), "x^3 - 6*x^2 + 12*x - 8");
        assert!(exercise.check("x - 2", 3).unwrap());
        assert!(exercise.check("-2 + x", 3).unwrap());
        assert!(!exercise.check("x + 2", 3).unwrap());
        assert!(!exercise.check("x - 2", 2).unwrap());
        assert!(!exercise.check("x - 2", -3).unwrap());
        assert!(!exercise.check("x - 2", 0).unwrap());
        assert!(!exercise.check("x - 2", 5).unwrap());
        assert!(exercise.check("x - 2", 6).is_err());
        assert!(exercise.check("x + 1", 4_000_000_000).is_err());
        assert!(exercise.check("x -", 3).is_err());

        let two_variables = PresetIdentification::from_preset(4).unwrap();
        assert_eq!(two_variables.expanded().to_string(), "x^2 + 2*x*y + y^2");
        assert!(two_variables.check("y + x", 2).unwrap());

        assert!(PresetIdentification::from_preset(5).is_err());
    }

    #[test]
    fn every_preset_builds() {
        for index in 0..PresetIdentification::PRESETS.len() {
            assert!(PresetIdentification::from_preset(index).is_ok());
        }
        let mut rng = seeded(3);
        let preset = PresetIdentification::generate(&mut rng).unwrap();
        assert!(PresetIdentification::PRESETS.contains(&(preset.binomial, preset.exponent)));
    }

    #[test]
    fn lab_challenges() {
        let mut rng = seeded(11);
        let challenge = LabChallenge::generate(&mut rng);
        assert!(LabChallenge::ALL.contains(&challenge));
        assert_eq!(
            LabChallenge::SymmetricAboutYAxis.to_string(),
            "Adjust the parameters to create a function that is symmetric about the y axis.",
        );
    }
}
