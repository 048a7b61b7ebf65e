use crate::core::{
    error::{Result, SwitcherError},
    git::Gateway,
    print_step, print_success, render_template,
    state::State,
    switcher::{model_work_suffix, Switcher},
    TemplateContext, TEMPLATES,
};

/// Move to `target`, securing pending work on the state being left.
///
/// `base` only matters for [`State::Rewrite`]: it selects the branch a missing
/// rewrite branch is created from (preedit when absent).
pub fn execute_switch<G: Gateway>(
    switcher: &mut Switcher<G>,
    target: State,
    base: Option<State>,
) -> Result<()> {
    switcher.validate_git()?;

    if target == State::Rewrite {
        return switch_to_rewrite(switcher, base.unwrap_or(State::Preedit));
    }

    if !switcher.branch_exists(target.branch_name()) {
        return Err(SwitcherError::StateNotInitialized {
            state: target.to_string(),
        });
    }

    let current = switcher.current_branch();

    if current == target.branch_name() {
        if target.is_active() && switcher.has_changes() {
            switcher.auto_commit(&model_work_suffix(target))?;
        }
        print_ready(target);
        return Ok(());
    }

    switcher.commit_before_switch(&current)?;
    switcher.switch_branch(target.branch_name())?;
    print_now_on(target);
    Ok(())
}

fn switch_to_rewrite<G: Gateway>(switcher: &mut Switcher<G>, base: State) -> Result<()> {
    if !switcher.branch_exists(base.branch_name()) {
        return Err(SwitcherError::BaseBranchMissing {
            branch: base.to_string(),
        });
    }

    let rewrite = State::Rewrite.branch_name();
    let current = switcher.current_branch();

    if switcher.branch_exists(rewrite) {
        if current == rewrite {
            if switcher.has_changes() {
                switcher.auto_commit(" - rewrite work")?;
            }
            print_ready(State::Rewrite);
            return Ok(());
        }

        switcher.commit_before_switch(&current)?;
        switcher.switch_branch(rewrite)?;
        print_now_on(State::Rewrite);
        return Ok(());
    }

    print_step(&format!("Creating rewrite branch from {base} branch..."));

    // Work in progress stays with the state it was made on
    switcher.commit_before_switch(&current)?;

    if current != base.branch_name() {
        switcher.switch_branch(base.branch_name())?;
    }
    switcher.create_branch(rewrite)?;

    let context = TemplateContext {
        base: Some(base.branch_name()),
        ..TemplateContext::for_state(State::Rewrite)
    };
    print_success(&render_template(TEMPLATES.rewrite_created, &context));
    Ok(())
}

fn print_ready(state: State) {
    let context = TemplateContext::for_state(state);
    print_success(&render_template(TEMPLATES.ready_for(state), &context));
}

fn print_now_on(state: State) {
    let context = TemplateContext::for_state(state);
    print_success(&render_template(TEMPLATES.now_on(state), &context));
}
