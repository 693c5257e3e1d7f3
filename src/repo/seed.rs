use crate::domain::{Roster, Tenant};

/// Demo house used on first start and when stored data cannot be read.
pub fn seed_roster() -> Roster {
    let rows: [(u32, &str, &str, &str, u64, u64, u64); 5] = [
        (1, "Diallo", "Mamadou", "A-101", 150000, 120, 245),
        (2, "Ndiaye", "Fatou", "A-102", 175000, 180, 310),
        (3, "Sarr", "Ousmane", "B-201", 200000, 200, 420),
        (4, "Touré", "Aminata", "B-202", 165000, 150, 280),
        (5, "Ba", "Moussa", "C-301", 185000, 220, 380),
    ];
    let tenants = rows
        .into_iter()
        .map(|(id, name, first_name, room, rent, prev, cur)| Tenant {
            id,
            name: name.to_string(),
            first_name: first_name.to_string(),
            room_label: room.to_string(),
            rent,
            meter_previous: prev,
            meter_current: cur,
            phone: None,
            photo_ref: None,
        })
        .collect();
    Roster::from_tenants(tenants).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::total_consumption;

    #[test]
    fn test_seed_is_consistent() {
        let roster = seed_roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster.next_id(), Some(6));
        assert_eq!(total_consumption(roster.tenants()), 125 + 130 + 220 + 130 + 160);
        assert!(roster.iter().all(|t| t.meter_current >= t.meter_previous));
    }
}
