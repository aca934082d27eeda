//! Step definitions that assemble the page object model and test body.

use crate::bdd::fixtures::{TestWorld, strip_quotes};
use anyhow::{Context, Result, anyhow, bail};
use rstest_bdd_macros::given;
use std::future::{Ready, ready};
use storyline::{PageObjectModel, StepArgs, StepKind, StepResult, StepTable};

fn register(world: &TestWorld, namespace: &str, phrase: &str, failure: Option<String>) -> Result<()> {
    let log = world.calls.clone();
    let label = format!("{namespace}:{phrase}");
    let implementation = move |_args: StepArgs| -> Ready<StepResult> {
        ready(match &failure {
            Some(message) => Err(anyhow!("{message}")),
            None => log.push(label.clone()),
        })
    };
    let mut slot = world.pom.borrow_mut();
    let pom = slot.get_or_insert_with(PageObjectModel::new);
    let table = match namespace {
        "given" => pom.given.get_or_insert_with(StepTable::new),
        "when" => pom.when.get_or_insert_with(StepTable::new),
        "then" => pom.then.get_or_insert_with(StepTable::new),
        "actions" => &mut pom.actions,
        other => bail!("unknown namespace '{other}'"),
    };
    table.insert(phrase, implementation);
    Ok(())
}

#[given("an empty page object model")]
fn empty_pom(world: &TestWorld) -> Result<()> {
    world.pom.borrow_mut().get_or_insert_with(PageObjectModel::new);
    Ok(())
}

#[given("the {namespace} namespace registers {phrase}")]
fn registers_step(world: &TestWorld, namespace: String, phrase: String) -> Result<()> {
    register(world, strip_quotes(&namespace), strip_quotes(&phrase), None)
}

#[given("the {namespace} namespace fails {phrase} with {message}")]
fn registers_failing_step(
    world: &TestWorld,
    namespace: String,
    phrase: String,
    message: String,
) -> Result<()> {
    let failure = strip_quotes(&message).to_owned();
    register(
        world,
        strip_quotes(&namespace),
        strip_quotes(&phrase),
        Some(failure),
    )
}

#[given("the test body runs {step}")]
fn test_body_runs(world: &TestWorld, step: String) -> Result<()> {
    let step = strip_quotes(&step);
    let (keyword, phrase) = step
        .split_once(' ')
        .with_context(|| format!("step '{step}' has no keyword"))?;
    let kind: StepKind = keyword.parse()?;
    world.planned.borrow_mut().push((kind, phrase.to_owned()));
    Ok(())
}
