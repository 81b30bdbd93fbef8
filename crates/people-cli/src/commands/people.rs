use anyhow::{Result, bail};
use colored::Colorize;
use people_application::{PeopleController, PeopleState};
use people_core::config::ApiConfig;
use people_core::person::{Person, PersonCreateDto, PersonUpdateDto};
use people_interaction::{PeopleApiClient, TracingErrorSink};
use std::sync::Arc;

fn controller(config: &ApiConfig, page_size: Option<u32>) -> Result<PeopleController> {
    let client = PeopleApiClient::from_config(config, Arc::new(TracingErrorSink))?;
    let page_size = page_size.unwrap_or(config.page_size);
    Ok(PeopleController::with_page_size(Arc::new(client), page_size))
}

/// Turns a recovered controller error into a command failure.
fn ensure_ok(state: &PeopleState) -> Result<()> {
    if let Some(message) = &state.error {
        bail!("{}", message);
    }
    Ok(())
}

async fn load(controller: &PeopleController) -> Result<PeopleState> {
    controller.load().await;
    let state = controller.snapshot();
    ensure_ok(&state)?;
    Ok(state)
}

fn print_person(person: &Person) {
    println!(
        "{:>4}  {:<24} {}",
        person.id.to_string().bold(),
        person.full_name(),
        person.email.dimmed()
    );
}

fn find(state: &PeopleState, id: u64) -> Result<Person> {
    match state.find(id) {
        Some(person) => Ok(person.clone()),
        None => bail!("Person {} is not on the first page", id),
    }
}

pub async fn list(config: &ApiConfig, page_size: Option<u32>) -> Result<()> {
    let controller = controller(config, page_size)?;
    let state = load(&controller).await?;

    if state.people.is_empty() {
        println!("{}", "No people found.".bright_black());
        return Ok(());
    }

    for person in &state.people {
        print_person(person);
    }
    Ok(())
}

pub async fn create(config: &ApiConfig, dto: PersonCreateDto) -> Result<()> {
    let controller = controller(config, None)?;
    load(&controller).await?;

    controller.open_add();
    controller.create(dto).await;

    let state = controller.snapshot();
    ensure_ok(&state)?;
    if let Some(created) = state.people.first() {
        println!("{}", "Created:".green());
        print_person(created);
    }
    Ok(())
}

pub async fn update(config: &ApiConfig, id: u64, dto: PersonUpdateDto) -> Result<()> {
    let controller = controller(config, None)?;
    let state = load(&controller).await?;
    let person = find(&state, id)?;

    controller.open_edit(person);
    controller.save_edit(dto).await;

    let state = controller.snapshot();
    ensure_ok(&state)?;
    let updated = find(&state, id)?;
    println!("{}", "Updated:".green());
    print_person(&updated);
    Ok(())
}

pub async fn delete(config: &ApiConfig, id: u64) -> Result<()> {
    let controller = controller(config, None)?;
    let state = load(&controller).await?;
    let person = find(&state, id)?;

    controller.open_delete(person.clone());
    controller.confirm_delete().await;

    ensure_ok(&controller.snapshot())?;
    println!("{} {}", "Deleted:".green(), person.full_name());
    Ok(())
}
