use super::*;
use shared::domain::MIN_HEADCOUNT;

fn fill_valid_representative(controller: &mut RegistrationController) {
    controller.set_representative_text(Field::FirstName, "Ana");
    controller.set_representative_text(Field::LastName, "Rojas");
    controller.set_representative_text(Field::Email, "ana@empresa.cl");
    controller.set_representative_text(Field::Role, "Gerenta");
    controller.set_representative_text(Field::Company, "Empresa SpA");
    controller.set_representative_text(Field::TaxId, "76543210-5");
    controller.set_representative_sessions(Some(SessionCount::One));
}

fn fill_valid_member(controller: &mut RegistrationController, index: usize) {
    controller.set_member_text(index, Field::FirstName, "Luis");
    controller.set_member_text(index, Field::LastName, "Soto");
    controller.set_member_text(index, Field::Email, "luis@empresa.cl");
    controller.set_member_text(index, Field::Role, "Analista");
    controller.set_member_sessions(index, Some(SessionCount::Two));
}

#[test]
fn starts_with_defaults_and_is_not_valid() {
    let controller = RegistrationController::new();
    assert_eq!(controller.form().representative.headcount, MIN_HEADCOUNT);
    assert_eq!(controller.form().representative.sessions, None);
    assert!(!controller.form().representative.registering_team);
    assert!(controller.form().team.is_empty());
    assert!(!controller.is_valid());
    // Untouched fields show no inline errors yet.
    assert!(controller.field_errors().is_empty());
}

#[test]
fn becomes_valid_once_every_required_field_is_filled() {
    let mut controller = RegistrationController::new();
    fill_valid_representative(&mut controller);
    assert!(controller.is_valid());
    assert!(controller.field_errors().is_empty());
}

#[test]
fn unselected_sessions_are_not_pre_valid() {
    let mut controller = RegistrationController::new();
    fill_valid_representative(&mut controller);
    let error = controller.set_representative_sessions(None).expect("error");
    assert_eq!(error.path, FieldPath::Representative(Field::Sessions));
    assert!(!controller.is_valid());
}

#[test]
fn setter_reports_and_records_the_field_error() {
    let mut controller = RegistrationController::new();
    let error = controller
        .set_representative_text(Field::Email, "sin-arroba")
        .expect("invalid email");
    assert_eq!(error.path, FieldPath::Representative(Field::Email));
    assert_eq!(
        controller.error_for(FieldPath::Representative(Field::Email)),
        Some("Por favor ingrese un email válido")
    );

    assert!(controller
        .set_representative_text(Field::Email, "ana@empresa.cl")
        .is_none());
    assert_eq!(
        controller.error_for(FieldPath::Representative(Field::Email)),
        None
    );
}

#[test]
fn blank_phone_is_stored_as_absent_and_valid() {
    let mut controller = RegistrationController::new();
    assert!(controller
        .set_representative_text(Field::Phone, "   ")
        .is_none());
    assert_eq!(controller.form().representative.phone, None);

    assert!(controller
        .set_representative_text(Field::Phone, "+56 9 1234 5678")
        .is_none());
    assert!(controller
        .set_representative_text(Field::Phone, "no numérico")
        .is_some());
}

#[test]
fn headcount_drives_the_roster_only_while_registering_a_team() {
    let mut controller = RegistrationController::new();
    controller.set_headcount(4);
    assert!(controller.form().team.is_empty());

    controller.set_registering_team(true);
    assert_eq!(controller.form().team.len(), 3);

    controller.set_headcount(2);
    assert_eq!(controller.form().team.len(), 1);

    controller.set_registering_team(false);
    assert!(controller.form().team.is_empty());
}

#[test]
fn roster_shrink_drops_errors_of_removed_rows() {
    let mut controller = RegistrationController::new();
    controller.set_registering_team(true);
    controller.set_headcount(3);
    controller.set_member_text(1, Field::Email, "roto");
    assert!(controller
        .error_for(FieldPath::TeamMember {
            index: 1,
            field: Field::Email,
        })
        .is_some());

    controller.set_headcount(2);
    assert_eq!(controller.form().team.len(), 1);
    assert!(controller
        .error_for(FieldPath::TeamMember {
            index: 1,
            field: Field::Email,
        })
        .is_none());
}

#[test]
fn retained_rows_survive_a_shrink_and_regrow() {
    let mut controller = RegistrationController::new();
    controller.set_registering_team(true);
    controller.set_headcount(3);
    controller.set_member_text(0, Field::FirstName, "Luis");
    controller.set_member_text(1, Field::FirstName, "Mara");

    controller.set_headcount(2);
    controller.set_headcount(3);
    assert_eq!(controller.form().team[0].first_name, "Luis");
    assert_eq!(controller.form().team[1].first_name, "");
}

#[test]
fn aggregate_validity_requires_every_member_to_pass() {
    let mut controller = RegistrationController::new();
    fill_valid_representative(&mut controller);
    controller.set_registering_team(true);
    controller.set_headcount(3);
    assert!(!controller.is_valid());

    fill_valid_member(&mut controller, 0);
    assert!(!controller.is_valid());

    fill_valid_member(&mut controller, 1);
    assert!(controller.is_valid());

    // A member choosing zero sessions invalidates the form again.
    controller.set_member_sessions(1, Some(SessionCount::Skip));
    assert!(!controller.is_valid());
}

#[test]
fn validate_all_records_errors_for_untouched_fields() {
    let mut controller = RegistrationController::new();
    let errors = controller.validate_all();
    assert!(!errors.is_empty());
    assert!(controller
        .error_for(FieldPath::Representative(Field::FirstName))
        .is_some());
    assert!(controller
        .error_for(FieldPath::Representative(Field::Sessions))
        .is_some());
}

#[test]
fn out_of_range_member_edits_are_ignored() {
    let mut controller = RegistrationController::new();
    assert!(controller.set_member_text(5, Field::FirstName, "X").is_none());
    assert!(controller.set_member_sessions(5, None).is_none());
    assert!(controller.form().team.is_empty());
}

#[test]
fn reset_returns_to_defaults_and_clears_errors() {
    let mut controller = RegistrationController::new();
    fill_valid_representative(&mut controller);
    controller.set_registering_team(true);
    controller.set_headcount(5);
    controller.set_member_text(0, Field::Email, "roto");

    controller.reset();
    assert_eq!(controller.form(), &RegistrationForm::default());
    assert!(controller.field_errors().is_empty());
    assert!(!controller.is_valid());
}
