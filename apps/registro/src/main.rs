mod config;

use std::{fs, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{RecorderClient, RegistrationSession, SubmissionStatus};
use form_core::RegistrationController;
use serde::Deserialize;
use shared::{domain::SessionCount, error::Field, protocol::RegistrationPayload};
use tracing::warn;
use url::Url;

#[derive(Parser, Debug)]
struct Args {
    /// Registration draft to load (TOML, wire-vocabulary keys).
    #[arg(long)]
    input: PathBuf,
    /// Override the recording service endpoint.
    #[arg(long)]
    endpoint: Option<String>,
    /// Check endpoint reachability before submitting.
    #[arg(long)]
    probe: bool,
    /// Print the JSON payload instead of submitting.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct Draft {
    representante: DraftRepresentative,
    #[serde(default)]
    equipo: Vec<DraftMember>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DraftRepresentative {
    nombre: String,
    apellido: String,
    email: String,
    cargo: String,
    empresa: String,
    #[serde(rename = "rutEmpresa")]
    rut_empresa: String,
    telefono: Option<String>,
    #[serde(rename = "cuantasSesiones")]
    cuantas_sesiones: Option<u8>,
    #[serde(rename = "soloInscribiendoEquipo")]
    solo_inscribiendo_equipo: bool,
    #[serde(rename = "cantidadPersonas")]
    cantidad_personas: u32,
}

impl Default for DraftRepresentative {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            apellido: String::new(),
            email: String::new(),
            cargo: String::new(),
            empresa: String::new(),
            rut_empresa: String::new(),
            telefono: None,
            cuantas_sesiones: None,
            solo_inscribiendo_equipo: false,
            cantidad_personas: 1,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DraftMember {
    nombre: String,
    apellido: String,
    email: String,
    cargo: String,
    telefono: Option<String>,
    #[serde(rename = "cuantasSesiones")]
    cuantas_sesiones: Option<u8>,
}

fn parse_sessions(value: Option<u8>) -> Option<SessionCount> {
    value.and_then(|v| SessionCount::try_from(v).ok())
}

/// Applies the draft through the controller field by field: headcount and
/// the team flag first, so the roster rows exist before member fields are
/// set.
fn apply_draft(form: &mut RegistrationController, draft: &Draft) {
    let rep = &draft.representante;
    form.set_registering_team(rep.solo_inscribiendo_equipo);
    form.set_headcount(rep.cantidad_personas);
    form.set_representative_text(Field::FirstName, rep.nombre.clone());
    form.set_representative_text(Field::LastName, rep.apellido.clone());
    form.set_representative_text(Field::Email, rep.email.clone());
    form.set_representative_text(Field::Role, rep.cargo.clone());
    form.set_representative_text(Field::Company, rep.empresa.clone());
    form.set_representative_text(Field::TaxId, rep.rut_empresa.clone());
    if let Some(telefono) = &rep.telefono {
        form.set_representative_text(Field::Phone, telefono.clone());
    }
    form.set_representative_sessions(parse_sessions(rep.cuantas_sesiones));

    if !rep.solo_inscribiendo_equipo && !draft.equipo.is_empty() {
        warn!("draft lists team members but soloInscribiendoEquipo is false; they are ignored");
    }
    let roster_len = form.form().team.len();
    if rep.solo_inscribiendo_equipo && draft.equipo.len() != roster_len {
        warn!(
            "draft lists {} team members but cantidadPersonas allows {}",
            draft.equipo.len(),
            roster_len
        );
    }

    for (index, member) in draft.equipo.iter().enumerate() {
        form.set_member_text(index, Field::FirstName, member.nombre.clone());
        form.set_member_text(index, Field::LastName, member.apellido.clone());
        form.set_member_text(index, Field::Email, member.email.clone());
        form.set_member_text(index, Field::Role, member.cargo.clone());
        if let Some(telefono) = &member.telefono {
            form.set_member_text(index, Field::Phone, telefono.clone());
        }
        form.set_member_sessions(index, parse_sessions(member.cuantas_sesiones));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint_url = endpoint;
    }
    let endpoint: Url = settings
        .endpoint_url
        .parse()
        .with_context(|| format!("invalid endpoint url '{}'", settings.endpoint_url))?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read draft '{}'", args.input.display()))?;
    let draft: Draft = toml::from_str(&raw)
        .with_context(|| format!("failed to parse draft '{}'", args.input.display()))?;

    let recorder = RecorderClient::with_timeout(
        endpoint,
        Duration::from_secs(settings.request_timeout_seconds),
    )
    .context("failed to build http client")?;

    if args.probe {
        let reachable = recorder.probe_connectivity().await;
        println!(
            "Conectividad con el servicio: {}",
            if reachable { "ok" } else { "sin conexión" }
        );
    }

    let session = RegistrationSession::with_reset_delay(
        Arc::new(recorder),
        Duration::from_secs(settings.reset_delay_seconds),
    );
    session.with_form(|form| apply_draft(form, &draft)).await;

    let errors = session.with_form(|form| form.validate_all()).await;
    if !errors.is_empty() {
        eprintln!("El formulario tiene {} error(es):", errors.len());
        for error in &errors {
            eprintln!("  {error}");
        }
        std::process::exit(1);
    }

    if args.dry_run {
        let payload = RegistrationPayload::from_form(&session.form().await);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match session.submit().await? {
        SubmissionStatus::Success { message } => {
            println!("✅ {message}");
            Ok(())
        }
        SubmissionStatus::Error { message } => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
        status => anyhow::bail!("unexpected submission status: {status:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = r#"
[representante]
nombre = "Ana"
apellido = "Rojas"
email = "ana@empresa.cl"
cargo = "Gerenta"
empresa = "Empresa SpA"
rutEmpresa = "76543210-5"
cuantasSesiones = 0
soloInscribiendoEquipo = true
cantidadPersonas = 2

[[equipo]]
nombre = "Luis"
apellido = "Soto"
email = "luis@empresa.cl"
cargo = "Analista"
telefono = "+56 9 1234 5678"
cuantasSesiones = 2
"#;

    #[test]
    fn draft_applies_field_by_field_and_validates() {
        let draft: Draft = toml::from_str(DRAFT).expect("parse draft");
        let mut form = RegistrationController::new();
        apply_draft(&mut form, &draft);

        assert!(form.is_valid(), "errors: {:?}", form.field_errors());
        assert_eq!(form.form().team.len(), 1);
        assert_eq!(form.form().team[0].first_name, "Luis");
        assert_eq!(
            form.form().representative.sessions,
            Some(SessionCount::Skip)
        );
    }

    #[test]
    fn members_without_a_roster_seat_are_dropped() {
        let mut draft: Draft = toml::from_str(DRAFT).expect("parse draft");
        draft.representante.cantidad_personas = 1;
        let mut form = RegistrationController::new();
        apply_draft(&mut form, &draft);

        assert!(form.form().team.is_empty());
        assert!(form.is_valid());
    }

    #[test]
    fn invalid_session_numbers_surface_as_field_errors() {
        let mut draft: Draft = toml::from_str(DRAFT).expect("parse draft");
        draft.representante.cuantas_sesiones = Some(7);
        let mut form = RegistrationController::new();
        apply_draft(&mut form, &draft);

        assert!(!form.is_valid());
    }
}
