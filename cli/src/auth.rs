//! Sign-in, registration and profile commands.

use clap::Args;
use flows::{Route, validate};
use wire::RequestError;
use wire::api::friendly_registration_error;
use wire::types::{LoginForm, PersonalData, Registration, Role, UserProfile};

use crate::{CliError, Context, print_json};

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    username: String,
    #[arg(long, env = "TOUCHGLYPH_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    full_name: String,
    #[arg(long, env = "TOUCHGLYPH_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, default_value = "student")]
    role: Role,
}

#[derive(Args, Debug)]
pub(crate) struct ProfileArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: Option<String>,
}

pub(crate) async fn ping(ctx: &Context) -> Result<(), CliError> {
    let online = ctx.api().auth().ping().await;
    println!("{}", if online { "online" } else { "offline" });
    Ok(())
}

pub(crate) async fn login(ctx: &Context, args: LoginArgs) -> Result<(), CliError> {
    let form = validate::login(&LoginForm {
        username: args.username,
        password: args.password,
    })?;
    let response = ctx.api().auth().login(&form).await?;
    ctx.session.sign_in(&response)?;
    tracing::info!(user_id = response.user.id, role = %response.user.role, "signed in");
    println!(
        "Signed in as {} ({}); home is {}",
        response.user.display_name(),
        response.user.role.label(),
        Route::landing(response.user.role).path()
    );
    Ok(())
}

pub(crate) async fn register(ctx: &Context, args: RegisterArgs) -> Result<(), CliError> {
    let registration = Registration {
        username: args.username.trim().to_owned(),
        full_name: args.full_name.trim().to_owned(),
        password: args.password,
        role: args.role,
    };
    validate::registration(&registration)?;
    let user = ctx
        .api()
        .auth()
        .register(&registration)
        .await
        .map_err(|error| RequestError::Rejected(friendly_registration_error(&error)))?;
    println!("Registered {} as {}; sign in with `touchglyph login`", user.username, user.role.label());
    Ok(())
}

pub(crate) fn logout(ctx: &Context) -> Result<(), CliError> {
    ctx.session.logout();
    tracing::info!(path = %ctx.session.storage().path().display(), "session cleared");
    println!("Signed out");
    Ok(())
}

pub(crate) fn whoami(ctx: &Context) -> Result<(), CliError> {
    print_json(&ctx.user()?)
}

pub(crate) fn personal_data(args: ProfileArgs) -> Result<PersonalData, CliError> {
    let full_name = args.full_name.trim().to_owned();
    if full_name.is_empty() {
        return Err(flows::ValidationError::Required("full name").into());
    }
    let email = args.email.map(|email| email.trim().to_owned()).filter(|email| !email.is_empty());
    Ok(PersonalData { full_name, email })
}

pub(crate) async fn update_profile(ctx: &Context, args: ProfileArgs) -> Result<(), CliError> {
    let user = ctx.user()?;
    let data = personal_data(args)?;
    ctx.api().auth().update_personal_data(user.id, &data).await?;
    let updated = UserProfile {
        full_name: data.full_name,
        email: data.email,
        ..user
    };
    ctx.session.update_profile(&updated)?;
    print_json(&updated)
}
