use super::prompts;
use crate::context::AppContext;
use crate::output::Output;
use crate::AccountCommands;
use catalog_models::{SessionPhase, UserProfile};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets, Cell, Table};
use serde_json::json;

pub fn run_account(ctx: &AppContext, cmd: AccountCommands, output: &Output) -> Result<()> {
    match cmd {
        AccountCommands::Signup { name, email } => sign_up(ctx, name, email, output),
        AccountCommands::Pay => pay(ctx, output),
        AccountCommands::Signin { email } => sign_in(ctx, email, output),
        AccountCommands::Signout => {
            let mut session = ctx.session();
            session.sign_out();
            output.success("Signed out");
            Ok(())
        }
        AccountCommands::Show => show(ctx, output),
    }
}

fn sign_up(ctx: &AppContext, name: Option<String>, email: Option<String>, output: &Output) -> Result<()> {
    let full_name = prompts::value_or_prompt(name, "Full name")?;
    let email = prompts::value_or_prompt(email, "Email")?;
    if !email.contains('@') {
        return Err(eyre!("Invalid email address: {}", email));
    }
    let password = prompts::prompt_new_password("Password")?;
    if password.is_empty() {
        return Err(eyre!("Password cannot be empty"));
    }

    let mut session = ctx.session();
    if session.phase() != SessionPhase::Anonymous {
        output.warn("Replacing the existing account on this device");
    }
    session.sign_up(UserProfile::new(full_name.trim(), email.trim(), password));
    output.success(format!("Account created for {}", session.display_name()));
    output.info("Next: complete your membership with 'streamsavvy account pay'");
    Ok(())
}

fn pay(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut session = ctx.session();
    if session.phase() == SessionPhase::Anonymous {
        return Err(eyre!("Create an account first: streamsavvy account signup"));
    }
    session.complete_payment();
    output.success("Membership active");
    output.info("Next: sign in with 'streamsavvy account signin'");
    Ok(())
}

fn sign_in(ctx: &AppContext, email: Option<String>, output: &Output) -> Result<()> {
    let email = prompts::value_or_prompt(email, "Email")?;
    let password = prompts::prompt_password("Password")?;

    let mut session = ctx.session();
    if !session.sign_in(&email, &password) {
        return Err(eyre!(
            "Sign-in failed: check your email and password, and that your membership payment is complete"
        ));
    }
    output.success(format!("Welcome back, {}", session.display_name()));
    Ok(())
}

fn show(ctx: &AppContext, output: &Output) -> Result<()> {
    let session = ctx.session();
    let overview = session.account_overview();

    if !output.is_human() {
        output.json(&json!({
            "account": overview,
            "phase": session.phase(),
            "can_access_home": session.can_access_home(),
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let signed_in = if session.state().authenticated { "Yes" } else { "No" };
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.add_row(vec![Cell::new("Name"), Cell::new(&overview.name)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&overview.email)]);
    table.add_row(vec![Cell::new("Membership"), Cell::new(&overview.status)]);
    table.add_row(vec![Cell::new("Signed in"), Cell::new(signed_in)]);
    println!("{}", table);
    Ok(())
}
