use rand::{Rng, RngCore};

/// Question indices below this are addition, everything from here on is
/// subtraction.
const SUBTRACTION_FROM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
        }
    }
}

/// One arithmetic question: two single-digit operands, an operator, and the
/// expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub first: u8,
    pub second: u8,
    pub op: Op,
    pub answer: i32,
}

impl Problem {
    /// Generate the problem for a given question index. The policy is fixed:
    /// the first two questions add, the rest subtract with the operands
    /// swapped if needed so the answer is never negative. Repeats are
    /// permitted; each call draws fresh operands.
    pub fn generate(index: usize, rng: &mut dyn RngCore) -> Self {
        let a: u8 = rng.gen_range(0..=9);
        let b: u8 = rng.gen_range(0..=9);

        if index < SUBTRACTION_FROM {
            Self {
                first: a,
                second: b,
                op: Op::Add,
                answer: a as i32 + b as i32,
            }
        } else {
            let (first, second) = if a < b { (b, a) } else { (a, b) };
            Self {
                first,
                second,
                op: Op::Sub,
                answer: first as i32 - second as i32,
            }
        }
    }

    pub fn check(&self, answer: i32) -> bool {
        self.answer == answer
    }

    /// Display form for the question screen, e.g. `3 + 4 = ?`
    pub fn display(&self) -> String {
        format!("{} {} {} = ?", self.first, self.op.symbol(), self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn first_two_indices_are_addition() {
        let mut rng = StdRng::seed_from_u64(42);

        for index in 0..SUBTRACTION_FROM {
            for _ in 0..200 {
                let p = Problem::generate(index, &mut rng);
                assert_eq!(p.op, Op::Add);
                assert!(p.first <= 9);
                assert!(p.second <= 9);
                assert_eq!(p.answer, p.first as i32 + p.second as i32);
                assert!((0..=18).contains(&p.answer));
            }
        }
    }

    #[test]
    fn later_indices_are_subtraction_with_non_negative_answer() {
        let mut rng = StdRng::seed_from_u64(42);

        for index in SUBTRACTION_FROM..5 {
            for _ in 0..200 {
                let p = Problem::generate(index, &mut rng);
                assert_eq!(p.op, Op::Sub);
                assert!(p.first <= 9);
                assert!(p.second <= 9);
                assert!(p.first >= p.second, "operands must be swapped at generation");
                assert_eq!(p.answer, p.first as i32 - p.second as i32);
                assert!((0..=9).contains(&p.answer));
            }
        }
    }

    #[test]
    fn subtraction_answer_is_max_minus_min_of_the_draws() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let p = Problem::generate(3, &mut rng);
            let hi = p.first.max(p.second) as i32;
            let lo = p.first.min(p.second) as i32;
            assert_eq!(p.answer, hi - lo);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut a = StdRng::seed_from_u64(123);
        let mut b = StdRng::seed_from_u64(123);

        for index in 0..4 {
            assert_eq!(
                Problem::generate(index, &mut a),
                Problem::generate(index, &mut b)
            );
        }
    }

    #[test]
    fn check_compares_against_expected_answer() {
        let p = Problem {
            first: 7,
            second: 2,
            op: Op::Sub,
            answer: 5,
        };

        assert!(p.check(5));
        assert!(!p.check(9));
        assert!(!p.check(-5));
    }

    #[test]
    fn display_shows_operator_symbol() {
        let add = Problem {
            first: 3,
            second: 4,
            op: Op::Add,
            answer: 7,
        };
        let sub = Problem {
            first: 8,
            second: 1,
            op: Op::Sub,
            answer: 7,
        };

        assert_eq!(add.display(), "3 + 4 = ?");
        assert_eq!(sub.display(), "8 - 1 = ?");
    }
}
