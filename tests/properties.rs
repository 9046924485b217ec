//! Property tests over pairing, grouping and bracket shape.

use mixed_doubles_cup::{
    bracket_size, generate_bracket, generate_groups, generate_teams, Category, Participant, Team,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn names(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

proptest! {
    #[test]
    fn pairing_uses_every_name_once(a in 0usize..24, b in 0usize..24, seed in any::<u64>()) {
        let (list_a, list_b) = (names("a", a), names("b", b));
        let teams = generate_teams(&list_a, &list_b, &mut StdRng::seed_from_u64(seed));

        let mut used: Vec<String> = teams
            .iter()
            .flat_map(|t| t.members.iter().map(|m| m.name.clone()))
            .collect();
        used.sort();
        let mut expected: Vec<String> = list_a.into_iter().chain(list_b).collect();
        expected.sort();
        prop_assert_eq!(used, expected);

        prop_assert!(teams.iter().all(|t| !t.members.is_empty() && t.members.len() <= 2));
        let solos = teams.iter().filter(|t| t.is_solo()).count();
        prop_assert_eq!(solos, (a + b) % 2);

        let mixed = teams
            .iter()
            .filter(|t| t.members.iter().any(|m| m.category == Category::A)
                && t.members.iter().any(|m| m.category == Category::B))
            .count();
        prop_assert_eq!(mixed, a.min(b));
    }

    #[test]
    fn groups_hold_two_or_three_teams(n in 2usize..60, seed in any::<u64>()) {
        let teams: Vec<Team> = (0..n)
            .map(|i| Team::solo(Participant::new(format!("T{i}"), Category::A)))
            .collect();
        let groups = generate_groups(&teams, 3, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(groups.iter().map(|g| g.teams.len()).sum::<usize>(), n);
        for g in &groups {
            let k = g.teams.len();
            prop_assert!((2..=3).contains(&k));
            prop_assert_eq!(g.matches.len(), k * (k - 1) / 2);
        }
    }

    #[test]
    fn bracket_has_one_match_fewer_than_its_size(n in 2usize..130) {
        let seeds: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        let matches = generate_bracket(&seeds);
        let size = bracket_size(n);
        prop_assert_eq!(matches.len(), size - 1);
        prop_assert_eq!(matches.iter().filter(|m| m.round == 0).count(), size / 2);
        let last = matches.iter().map(|m| m.round).max().unwrap_or(0);
        prop_assert_eq!(matches.iter().filter(|m| m.round == last).count(), 1);
        prop_assert!(matches.iter().filter(|m| m.round < last).all(|m| m.next_match_id.is_some()));
    }
}
