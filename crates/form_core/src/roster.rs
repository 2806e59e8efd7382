//! Keeps the team roster in lockstep with the registered headcount.

use shared::domain::TeamMember;

/// Reconciles the roster length with `headcount - 1` (the representative
/// occupies the first seat). Growth appends blank rows at the end; shrink
/// truncates from the end so earlier rows keep their in-progress data.
/// Returns whether the roster was mutated; calling again with the same
/// headcount is a no-op.
pub fn reconcile_team(team: &mut Vec<TeamMember>, headcount: u32) -> bool {
    let target = headcount.saturating_sub(1) as usize;
    if target == team.len() {
        return false;
    }
    if target > team.len() {
        team.resize_with(target, TeamMember::blank);
    } else {
        team.truncate(target);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{SessionCount, MAX_HEADCOUNT};

    #[test]
    fn roster_length_tracks_headcount_minus_one() {
        for headcount in 1..=MAX_HEADCOUNT {
            let mut team = Vec::new();
            reconcile_team(&mut team, headcount);
            assert_eq!(team.len(), headcount.saturating_sub(1) as usize);
        }
    }

    #[test]
    fn headcount_of_zero_or_one_leaves_no_roster() {
        let mut team = vec![TeamMember::blank(), TeamMember::blank()];
        assert!(reconcile_team(&mut team, 1));
        assert!(team.is_empty());

        let mut team = vec![TeamMember::blank()];
        assert!(reconcile_team(&mut team, 0));
        assert!(team.is_empty());
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let mut team = Vec::new();
        assert!(reconcile_team(&mut team, 5));
        let snapshot = team.clone();
        assert!(!reconcile_team(&mut team, 5));
        assert_eq!(team, snapshot);
    }

    #[test]
    fn appended_rows_are_blank_with_one_session_preselected() {
        let mut team = Vec::new();
        reconcile_team(&mut team, 3);
        assert!(team
            .iter()
            .all(|member| member.sessions == Some(SessionCount::One)));
    }

    #[test]
    fn shrinking_then_growing_preserves_earlier_rows_only() {
        let mut team = Vec::new();
        reconcile_team(&mut team, 4);
        team[0].first_name = "Primero".into();
        team[2].first_name = "Tercero".into();

        reconcile_team(&mut team, 2);
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].first_name, "Primero");

        reconcile_team(&mut team, 4);
        assert_eq!(team.len(), 3);
        assert_eq!(team[0].first_name, "Primero");
        assert_eq!(team[2].first_name, "");
    }
}
