use bestiary_data::monster::Monster;

use crate::selection::SelectionState;

/// Monsters passing the CR bounds and movement filters, in input order.
///
/// The selected group is not applied here; see [`select_group`].
#[must_use]
pub fn filter<'a>(monsters: &'a [Monster], state: &SelectionState) -> Vec<&'a Monster> {
    let range = state.cr_range().ordered();
    monsters
        .iter()
        .filter(|m| range.contains(m.challenge_rating))
        .filter(|m| !state.only_flying() || m.can_fly)
        .filter(|m| !state.only_swimming() || m.can_swim)
        .collect()
}

/// Narrows a filtered subset to the selected group of the current dimension.
///
/// Without a selection the subset is returned unchanged.
#[must_use]
pub fn select_group<'a>(subset: &[&'a Monster], state: &SelectionState) -> Vec<&'a Monster> {
    match state.selected_group() {
        None => subset.to_vec(),
        Some(key) => {
            let dimension = state.dimension();
            subset
                .iter()
                .copied()
                .filter(|m| dimension.key_of(m) == Some(key))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use bestiary_data::{
        CrRange,
        monster::{MonsterRow, normalize},
    };

    use super::*;
    use crate::selection::SelectionEvent;

    fn monster(name: &str, env: &str, cr: &str, fly: bool, swim: bool) -> Monster {
        normalize(&MonsterRow {
            name: Some(name.into()),
            environment: Some(env.into()),
            cr: Some(cr.into()),
            speed_fly: fly.then(|| "40".into()),
            speed_swim: swim.then(|| "30".into()),
            ..MonsterRow::default()
        })
        .unwrap()
    }

    fn sample() -> Vec<Monster> {
        vec![
            monster("Bat", "Cave", "0", true, false),
            monster("Eel", "Sea", "1", false, true),
            monster("Roc", "Mountain", "11", true, false),
            monster("Turtle", "Sea", "1/2", false, true),
            monster("Dragon Turtle", "Sea", "17", false, true),
            monster("Bear", "Forest", "1", false, false),
        ]
    }

    fn names(subset: &[&Monster]) -> Vec<String> {
        subset.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_output_is_stable_subset_satisfying_predicates() {
        let monsters = sample();
        let mut state = SelectionState::new(CrRange::new(0.0, 10.0));
        state.apply(SelectionEvent::SetOnlySwimming(true));

        let subset = filter(&monsters, &state);
        assert_eq!(names(&subset), ["Eel", "Turtle"]);
        for m in &subset {
            assert!(monsters.iter().any(|x| std::ptr::eq(x, *m)));
            assert!(m.can_swim);
            assert!((0.0..=10.0).contains(&m.challenge_rating));
        }
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let monsters = sample();
        let state = SelectionState::new(CrRange::new(12.0, 1.0));
        assert_eq!(names(&filter(&monsters, &state)), ["Eel", "Roc", "Bear"]);
    }

    #[test]
    fn test_flying_and_swimming_together() {
        let monsters = sample();
        let mut state = SelectionState::default();
        state.apply(SelectionEvent::SetOnlyFlying(true));
        assert_eq!(names(&filter(&monsters, &state)), ["Bat", "Roc"]);
        state.apply(SelectionEvent::SetOnlySwimming(true));
        assert!(filter(&monsters, &state).is_empty());
    }

    #[test]
    fn test_select_group() {
        let monsters = sample();
        let mut state = SelectionState::default();
        let subset = filter(&monsters, &state);
        assert_eq!(select_group(&subset, &state).len(), subset.len());

        state.apply(SelectionEvent::ToggleGroup("Sea".into()));
        let selected = select_group(&subset, &state);
        assert_eq!(names(&selected), ["Eel", "Turtle", "Dragon Turtle"]);
    }
}
