//! Property-based tests for the evaluator and executor.
//!
//! Arithmetic and logic are checked against native Rust operators, and
//! randomly generated return-free programs are checked against a tiny
//! reference model that replays their assignments, loop passes included.

#[cfg(test)]
mod properties_tests {
    use imp_interpreter as imp;

    use imp::environment::Environment;
    use imp::evaluator::evaluate;
    use imp::expr::Expr;
    use imp::interpreter::Interpreter;
    use imp::stmt::Stmt;
    use imp::value::Value;
    use proptest::prelude::*;

    fn eval_empty(expr: &Expr) -> Value {
        evaluate(expr, &Environment::new()).expect("closed expression evaluates")
    }

    // -- Program Generation Strategies --

    /// Shape of a generated statement, kept alongside the AST so the model
    /// can replay it without interpreting Imp.
    #[derive(Debug, Clone)]
    enum Step {
        Set(String, i64),
        Branch(bool, Vec<Step>),
        Repeat(u8, Vec<Step>),
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
    }

    fn step_strategy(depth: u32) -> BoxedStrategy<Step> {
        let set = (name_strategy(), any::<i64>()).prop_map(|(n, v)| Step::Set(n, v));

        if depth == 0 {
            return set.boxed();
        }

        let body = prop::collection::vec(step_strategy(depth - 1), 0..4);

        prop_oneof![
            3 => set,
            1 => (any::<bool>(), body.clone()).prop_map(|(c, b)| Step::Branch(c, b)),
            1 => (0u8..4, body).prop_map(|(k, b)| Step::Repeat(k, b)),
        ]
        .boxed()
    }

    /// Loop counters are named by nesting level, so an inner loop never
    /// clobbers the counter of the loop around it.
    fn counter(level: usize) -> String {
        format!("i{}", level)
    }

    /// Builds the Imp statement for `step`. A `Repeat` becomes
    /// `if (true) { iN = k; while (iN != 0) { …; iN = iN - 1; } }`.
    fn lower(step: &Step, level: usize) -> Stmt {
        match step {
            Step::Set(name, v) => Stmt::assign(name.as_str(), Expr::int(*v)),

            Step::Branch(taken, body) => Stmt::if_then(
                Expr::boolean(*taken),
                body.iter().map(|s| lower(s, level + 1)).collect(),
            ),

            Step::Repeat(times, body) => {
                let i = counter(level);
                let mut pass: Vec<Stmt> = body.iter().map(|s| lower(s, level + 1)).collect();
                pass.push(Stmt::assign(
                    i.as_str(),
                    Expr::sub(Expr::var(i.as_str()), Expr::int(1)),
                ));

                Stmt::if_then(
                    Expr::boolean(true),
                    vec![
                        Stmt::assign(i.as_str(), Expr::int(i64::from(*times))),
                        Stmt::while_loop(Expr::not_eq(Expr::var(i.as_str()), Expr::int(0)), pass),
                    ],
                )
            }
        }
    }

    fn set(bindings: &mut Vec<(String, i64)>, name: &str, value: i64) {
        match bindings.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => bindings.push((name.to_string(), value)),
        }
    }

    /// Replays the assignments `step` performs, in execution order.
    fn replay(step: &Step, level: usize, bindings: &mut Vec<(String, i64)>) {
        match step {
            Step::Set(name, v) => set(bindings, name, *v),

            Step::Branch(taken, body) => {
                if *taken {
                    for s in body {
                        replay(s, level + 1, bindings);
                    }
                }
            }

            Step::Repeat(times, body) => {
                let i = counter(level);
                let mut remaining = i64::from(*times);
                set(bindings, &i, remaining);

                while remaining != 0 {
                    for s in body {
                        replay(s, level + 1, bindings);
                    }
                    remaining -= 1;
                    set(bindings, &i, remaining);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn add_matches_native(n in any::<i64>(), m in any::<i64>()) {
            let expr = Expr::add(Expr::int(n), Expr::int(m));
            prop_assert_eq!(eval_empty(&expr), Value::Integer(n.wrapping_add(m)));
        }

        #[test]
        fn sub_matches_native(n in any::<i64>(), m in any::<i64>()) {
            let expr = Expr::sub(Expr::int(n), Expr::int(m));
            prop_assert_eq!(eval_empty(&expr), Value::Integer(n.wrapping_sub(m)));
        }

        #[test]
        fn logic_matches_native(a in any::<bool>(), b in any::<bool>()) {
            let and = Expr::and(Expr::boolean(a), Expr::boolean(b));
            let or = Expr::or(Expr::boolean(a), Expr::boolean(b));
            let not = Expr::not(Expr::boolean(a));

            prop_assert_eq!(eval_empty(&and), Value::Boolean(a && b));
            prop_assert_eq!(eval_empty(&or), Value::Boolean(a || b));
            prop_assert_eq!(eval_empty(&not), Value::Boolean(!a));
        }

        #[test]
        fn de_morgan_holds(a in any::<bool>(), b in any::<bool>()) {
            let lhs = Expr::not(Expr::and(Expr::boolean(a), Expr::boolean(b)));
            let rhs = Expr::or(Expr::not(Expr::boolean(a)), Expr::not(Expr::boolean(b)));

            prop_assert_eq!(eval_empty(&lhs), eval_empty(&rhs));
        }

        #[test]
        fn equality_is_negation_of_inequality(n in any::<i64>(), m in any::<i64>()) {
            let eq = eval_empty(&Expr::eq(Expr::int(n), Expr::int(m)));
            let ne = eval_empty(&Expr::not_eq(Expr::int(n), Expr::int(m)));

            prop_assert_eq!(eq, Value::Boolean(n == m));
            prop_assert_eq!(ne, Value::Boolean(n != m));
        }

        #[test]
        fn return_free_programs_reflect_every_assignment(
            steps in prop::collection::vec(step_strategy(3), 0..8)
        ) {
            let program: Vec<Stmt> = steps.iter().map(|s| lower(s, 0)).collect();

            let (env, value) = Interpreter::new()
                .execute_statements(&program, Environment::new())
                .expect("generated program runs")
                .into_parts();

            let mut expected = Vec::new();
            for step in &steps {
                replay(step, 0, &mut expected);
            }

            prop_assert_eq!(value, None);
            let actual: Vec<(String, i64)> = env
                .iter()
                .map(|(name, value)| match value {
                    Value::Integer(n) => (name.to_string(), *n),
                    Value::Boolean(_) => unreachable!("only integers are assigned"),
                })
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
