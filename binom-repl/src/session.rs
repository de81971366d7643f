//! Running commands.
//!
//! A [`Session`] holds the random number generator exercises are drawn from and the exercise
//! currently waiting for an answer. Everything else is computed fresh for each command.

use crate::{
    command::{Arg, Command, ExerciseKind, COMMANDS},
    error::{ArgumentCount, Error, InvalidInteger, NoExercise, TooLarge},
};
use binom_compute::{
    equivalence::equivalent,
    evaluate::{evaluate, sample, SampleRange},
    exercise::{
        seeded,
        CoefficientExercise,
        ExpansionExercise,
        IdentificationExercise,
        LabChallenge,
        PresetIdentification,
    },
    expand::{expand, expand_with_steps, ExpansionStep},
    identify::identify_binomial,
    parse_polynomial,
    pascal::{build_triangle, choose},
    primitive::int_from_str,
    symbolic::{Expression, Polynomial, Symbol},
};
use log::{debug, info};
use rand::rngs::StdRng;

/// The largest exponent `expand`, `steps` and `check` accept.
pub const MAX_EXPONENT: i64 = 100;

/// The largest exponent `plot` accepts.
pub const MAX_PLOT_EXPONENT: i64 = 10;

/// The most rows `triangle` prints.
pub const MAX_ROWS: i64 = 30;

/// The largest `n` `choose` accepts.
pub const MAX_CHOOSE: i64 = 10_000;

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text.
    Print(String),

    /// Nothing to print.
    Nothing,

    /// Stop reading input.
    Quit,
}

/// An exercise waiting for an answer.
#[derive(Debug, Clone)]
enum Exercise {
    Expansion(ExpansionExercise),
    Coefficient(CoefficientExercise),
    Identification(IdentificationExercise),
    Preset(PresetIdentification),
}

/// Converts an engine error into an error pointing into the given argument.
fn engine(arg: &Arg) -> impl FnOnce(binom_compute::Error) -> Error {
    let argument = arg.text.to_owned();
    move |error| Error::Engine { argument, error }
}

/// Parses an argument as an expression.
fn expression(arg: &Arg) -> Result<Expression, Error> {
    Expression::parse(arg.text).map_err(engine(arg))
}

/// Parses an integer argument that may be at most `limit`.
fn bounded(arg: &Arg, argument: &'static str, limit: i64) -> Result<i64, Error> {
    let value = arg.integer()?;
    if value > limit {
        return Err(binom_error::Error::new(vec![arg.span.clone()], TooLarge {
            argument,
            value,
            limit,
        }).into());
    }
    Ok(value)
}

/// Expands `(a + b)^n` from the arguments of a command.
fn expand_args(a: &Arg, b: &Arg, n: &Arg, limit: i64) -> Result<Polynomial, Error> {
    let a_expr = expression(a)?;
    let b_expr = expression(b)?;
    let n_value = bounded(n, "n", limit)?;
    expand(&a_expr, &b_expr, n_value).map_err(engine(n))
}

/// Formats one term of a step-by-step expansion.
fn format_step(a: &str, b: &str, n: u32, step: &ExpansionStep) -> String {
    format!(
        "k = {}: C({}, {}) * ({})^{} * ({})^{} = {}",
        step.k,
        n,
        step.k,
        a,
        step.a_exponent,
        b,
        step.b_exponent,
        step.term,
    )
}

/// Writes a polynomial followed by its terms, numbered in display order.
fn numbered(poly: &Polynomial) -> String {
    std::iter::once(poly.to_string())
        .chain(poly.terms().iter().enumerate().map(|(i, term)| format!("term {}: {}", i + 1, term)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Expands `(a + b)^n` one term at a time.
fn steps(a: &Arg, b: &Arg, n: &Arg) -> Result<String, Error> {
    let a_expr = expression(a)?;
    let b_expr = expression(b)?;
    let n_value = bounded(n, "n", MAX_EXPONENT)?;

    let mut steps: Vec<ExpansionStep> = Vec::new();
    let sum = expand_with_steps(&a_expr, &b_expr, n_value, &mut steps).map_err(engine(n))?;

    let mut lines = steps
        .iter()
        .map(|step| format_step(a.text, b.text, step.a_exponent + step.b_exponent, step))
        .collect::<Vec<_>>();
    lines.push(format!("sum: {}", sum));
    Ok(lines.join("\n"))
}

/// The text printed by `help`.
fn help() -> String {
    std::iter::once("commands:".to_string())
        .chain(COMMANDS.iter().map(|(_, usage)| format!("  {}", usage)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A REPL session.
#[derive(Debug)]
pub struct Session {
    rng: StdRng,
    exercise: Option<Exercise>,
}

impl Session {
    /// Creates a session whose exercises are drawn from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: seeded(seed),
            exercise: None,
        }
    }

    /// Runs one line of input.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, Error> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Outcome::Nothing);
        };
        debug!("running {:?}", command);

        let out = match command {
            Command::Expand { a, b, n } => numbered(&expand_args(&a, &b, &n, MAX_EXPONENT)?),
            Command::Steps { a, b, n } => steps(&a, &b, &n)?,
            Command::Choose { n, k } => {
                let n_value = bounded(&n, "n", MAX_CHOOSE)?;
                let k_value = k.integer()?;
                let value = choose(n_value, k_value)
                    .map_err(|err| engine(&k)(err.into()))?;
                format!("C({}, {}) = {}", n_value, k_value, value)
            },
            Command::Triangle { rows } => {
                let rows_value = bounded(&rows, "rows", MAX_ROWS)?;
                build_triangle(rows_value)
                    .map_err(|err| engine(&rows)(err.into()))?
                    .to_string()
            },
            Command::Check { a, b, n, answer } => {
                let expected = expand_args(&a, &b, &n, MAX_EXPONENT)?;
                if equivalent(&expected, answer.text).map_err(|err| engine(&answer)(err.into()))? {
                    "correct".to_string()
                } else {
                    format!("incorrect, the expansion is {}", expected)
                }
            },
            Command::Eval { poly, variable, x } => {
                let poly_value = parse_polynomial(poly.text).map_err(engine(&poly))?;
                let name = variable.variable()?;
                let x_value = x.number()?;
                let y = evaluate(&poly_value, &Symbol::new(name), x_value)
                    .map_err(|err| engine(&poly)(err.into()))?;
                y.to_string()
            },
            Command::Plot { a, b, n } => self.plot(&a, &b, &n)?,
            Command::Identify { poly } => {
                let poly_value = parse_polynomial(poly.text).map_err(engine(&poly))?;
                let symbols = poly_value.symbols();
                let variable = match symbols.len() {
                    1 => symbols.into_iter().next(),
                    _ => None,
                };
                match variable.and_then(|variable| identify_binomial(&poly_value, &variable)) {
                    Some(binomial) => format!("{} = {}", poly_value, binomial),
                    None => format!("{} is not of the form (a*x + b)^n", poly_value),
                }
            },
            Command::Exercise(kind) => self.start_exercise(kind)?,
            Command::Answer(args) => self.answer(&args)?,
            Command::Solution => self.solution()?,
            Command::Help => help(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Print(out))
    }

    /// Samples `(a + b)^n` in `x` over the default range and suggests a challenge.
    fn plot(&mut self, a: &Arg, b: &Arg, n: &Arg) -> Result<String, Error> {
        let poly = expand_args(a, b, n, MAX_PLOT_EXPONENT)?;
        let range = SampleRange::default();
        let samples = sample(&poly, &Symbol::new("x"), &range)
            .map_err(|err| engine(a)(err.into()))?;

        let mut lines = vec![format!("y = {}", poly), format!("{:>8}  {:>12}", "x", "y")];
        let last = samples.len().saturating_sub(1);
        lines.extend(
            samples
                .iter()
                .enumerate()
                .filter(|&(i, _)| i % 11 == 0 || i == last)
                .map(|(_, point)| format!("{:>8.3}  {:>12.4}", point.x, point.y)),
        );

        let (low, high) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), point| {
                (low.min(point.y), high.max(point.y))
            });
        lines.push(format!("y ranges from {:.4} to {:.4} on [{}, {}]", low, high, range.start, range.end));
        lines.push(format!("challenge: {}", LabChallenge::generate(&mut self.rng)));
        Ok(lines.join("\n"))
    }

    /// Draws a new exercise, replacing any unanswered one.
    fn start_exercise(&mut self, kind: ExerciseKind) -> Result<String, Error> {
        let (exercise, prompt) = match kind {
            ExerciseKind::Expand => {
                let exercise = ExpansionExercise::generate(&mut self.rng)
                    .map_err(|err| Error::Engine { argument: String::new(), error: err.into() })?;
                let prompt = format!("{}\nanswer with `answer <polynomial>`", exercise);
                (Exercise::Expansion(exercise), prompt)
            },
            ExerciseKind::Coefficient => {
                let exercise = CoefficientExercise::generate(&mut self.rng)
                    .map_err(|err| Error::Engine { argument: String::new(), error: err.into() })?;
                let prompt = format!("{}\nanswer with `answer <integer>`", exercise);
                (Exercise::Coefficient(exercise), prompt)
            },
            ExerciseKind::Identify(difficulty) => {
                let exercise = IdentificationExercise::generate(difficulty, &mut self.rng)
                    .map_err(|err| Error::Engine { argument: String::new(), error: err.into() })?;
                let prompt = format!("{} ({})\nanswer with `answer <a> ; <b> ; <n>`", exercise, difficulty);
                (Exercise::Identification(exercise), prompt)
            },
            ExerciseKind::Preset => {
                let exercise = PresetIdentification::generate(&mut self.rng)
                    .map_err(|error| Error::Engine { argument: String::new(), error })?;
                let prompt = format!("{}\nanswer with `answer <binomial> ; <exponent>`", exercise);
                (Exercise::Preset(exercise), prompt)
            },
        };

        if self.exercise.replace(exercise).is_some() {
            info!("replaced an unanswered exercise");
        }
        Ok(prompt)
    }

    /// Grades an answer to the current exercise. A correct answer ends the exercise.
    fn answer(&mut self, args: &[Arg]) -> Result<String, Error> {
        let Some(exercise) = &self.exercise else {
            return Err(binom_error::Error::new(Vec::new(), NoExercise).into());
        };

        let correct = match exercise {
            Exercise::Expansion(exercise) => {
                let [answer] = expect_args::<1>(args)?;
                exercise.check(answer.text).map_err(|err| engine(answer)(err.into()))?
            },
            Exercise::Coefficient(exercise) => {
                let [answer] = expect_args::<1>(args)?;
                let value = int_from_str(answer.text).ok_or_else(|| -> Error {
                    binom_error::Error::new(vec![answer.span.clone()], InvalidInteger {
                        text: answer.text.to_owned(),
                    }).into()
                })?;
                exercise.check(&value)
            },
            Exercise::Identification(exercise) => {
                let [a, b, n] = expect_args::<3>(args)?;
                let (a, b, n) = (a.integer()?, b.integer()?, n.integer()?);
                u32::try_from(n).is_ok_and(|n| exercise.check(a, b, n))
            },
            Exercise::Preset(exercise) => {
                let [binomial, exponent] = expect_args::<2>(args)?;
                let exponent_value = bounded(exponent, "exponent", i64::from(PresetIdentification::MAX_EXPONENT))?;
                exercise
                    .check(binomial.text, exponent_value)
                    .map_err(|err| engine(binomial)(err.into()))?
            },
        };

        if correct {
            self.exercise = None;
            Ok("correct".to_string())
        } else {
            Ok("incorrect, try again or type `solution`".to_string())
        }
    }

    /// Reveals the solution to the current exercise, ending it.
    fn solution(&mut self) -> Result<String, Error> {
        let exercise = self
            .exercise
            .take()
            .ok_or_else(|| -> Error { binom_error::Error::new(Vec::new(), NoExercise).into() })?;

        Ok(match exercise {
            Exercise::Expansion(exercise) => format!("{} = {}", exercise.binomial(), exercise.answer()),
            Exercise::Coefficient(exercise) => exercise.solution(),
            Exercise::Identification(exercise) => format!("{} = {}", exercise.binomial(), exercise.expanded()),
            Exercise::Preset(exercise) => format!("({})^{} = {}", exercise.binomial, exercise.exponent, exercise.expanded()),
        })
    }
}

/// Checks that an answer has exactly `N` parts.
fn expect_args<'a, 'b, const N: usize>(args: &'b [Arg<'a>]) -> Result<&'b [Arg<'a>; N], Error> {
    args.try_into().map_err(|_| {
        let span = match (args.first(), args.last()) {
            (Some(first), Some(last)) => first.span.start..last.span.end,
            _ => 0..0,
        };
        binom_error::Error::new(vec![span], ArgumentCount {
            command: "answer",
            usage: match N {
                1 => "answer <answer>",
                2 => "answer <binomial> ; <exponent>",
                _ => "answer <a> ; <b> ; <n>",
            },
            expected: N,
            found: args.len(),
        }).into()
    })
}
