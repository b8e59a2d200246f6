use crate::config::{Record, ResultSet, ResultTable};

/// The share of one party in a council.
#[derive(PartialEq, Debug, Clone)]
pub struct PartyShare {
    pub party: String,
    pub votes: u64,
    pub seats: u64,
    /// Percentage of the votes, rounded to 2 decimals.
    pub vote_percent: f64,
    /// Percentage of the seats, rounded to 2 decimals. Zero if no seat was
    /// allocated.
    pub seat_percent: f64,
}

/// Headline figures for one council.
#[derive(PartialEq, Debug, Clone)]
pub struct CouncilSummary {
    pub title: String,
    pub short_name: String,
    pub total_votes: u64,
    pub total_seats: u64,
    pub parties_contested: usize,
    /// The party with the most votes. The first one wins ties.
    pub most_votes: Option<String>,
    /// The party with the most seats. The first one wins ties.
    pub most_seats: Option<String>,
    pub shares: Vec<PartyShare>,
}

/// Totals over all the councils.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct DistrictTotals {
    pub councils: usize,
    pub votes: u64,
    pub seats: u64,
    pub party_entries: usize,
}

/// The name of the council without its number: `1 - MANNAR URBAN COUNCIL`
/// becomes `MANNAR URBAN COUNCIL`.
pub fn short_name(title: &str) -> &str {
    title.split(" - ").nth(1).unwrap_or(title)
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        let pct = part as f64 / total as f64 * 100.0;
        // Halves go to the even neighbour.
        (pct * 100.0).round_ties_even() / 100.0
    }
}

fn first_max<F>(records: &[Record], key: F) -> Option<String>
where
    F: Fn(&Record) -> u64,
{
    let mut best: Option<&Record> = None;
    for r in records {
        match best {
            Some(b) if key(r) <= key(b) => {}
            _ => best = Some(r),
        }
    }
    best.map(|r| r.party.clone())
}

impl CouncilSummary {
    pub fn from_table(table: &ResultTable) -> CouncilSummary {
        let total_votes: u64 = table.records.iter().map(|r| r.votes).sum();
        let total_seats: u64 = table.records.iter().map(|r| r.seats).sum();
        let shares = table
            .records
            .iter()
            .map(|r| PartyShare {
                party: r.party.clone(),
                votes: r.votes,
                seats: r.seats,
                vote_percent: percent(r.votes, total_votes),
                seat_percent: percent(r.seats, total_seats),
            })
            .collect();
        CouncilSummary {
            title: table.title.clone(),
            short_name: short_name(&table.title).to_string(),
            total_votes,
            total_seats,
            parties_contested: table.records.len(),
            most_votes: first_max(&table.records, |r| r.votes),
            most_seats: first_max(&table.records, |r| r.seats),
            shares,
        }
    }
}

impl DistrictTotals {
    pub fn from_results(results: &ResultSet) -> DistrictTotals {
        let mut totals = DistrictTotals::default();
        for table in results {
            totals.councils += 1;
            totals.party_entries += table.records.len();
            for r in table.records.iter() {
                totals.votes += r.votes;
                totals.seats += r.seats;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultTable {
        ResultTable {
            title: "1 - MANNAR URBAN COUNCIL".to_string(),
            records: vec![
                Record::new("UNP", 1500, 2),
                Record::new("SLPP", 1000, 1),
                Record::new("ITAK", 1500, 3),
            ],
        }
    }

    #[test]
    fn short_names() {
        assert_eq!(short_name("1 - MANNAR URBAN COUNCIL"), "MANNAR URBAN COUNCIL");
        assert_eq!(short_name("2 - A - B SABHA"), "A");
        assert_eq!(short_name("3- NO SPACE SABHA"), "3- NO SPACE SABHA");
    }

    #[test]
    fn council_figures() {
        let s = CouncilSummary::from_table(&table());
        assert_eq!(s.short_name, "MANNAR URBAN COUNCIL");
        assert_eq!(s.total_votes, 4000);
        assert_eq!(s.total_seats, 6);
        assert_eq!(s.parties_contested, 3);
        assert_eq!(s.most_votes, Some("UNP".to_string()));
        assert_eq!(s.most_seats, Some("ITAK".to_string()));
        assert_eq!(s.shares[0].vote_percent, 37.5);
        assert_eq!(s.shares[0].seat_percent, 33.33);
        assert_eq!(s.shares[2].seat_percent, 50.0);
    }

    #[test]
    fn no_seats_allocated() {
        let t = ResultTable {
            title: "4 - X SABHA".to_string(),
            records: vec![Record::new("A", 10, 0), Record::new("B", 30, 0)],
        };
        let s = CouncilSummary::from_table(&t);
        assert_eq!(s.most_seats, Some("A".to_string()));
        assert_eq!(s.shares[1].vote_percent, 75.0);
        assert_eq!(s.shares[1].seat_percent, 0.0);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(percent(1, 32), 3.12);
        assert_eq!(percent(3, 32), 9.38);
        assert_eq!(percent(1, 3), 33.33);
        assert_eq!(percent(5, 0), 0.0);
    }

    #[test]
    fn district_totals() {
        let mut results = ResultSet::new();
        results.insert(table());
        results.insert(ResultTable {
            title: "2 - MANNAR PRADESHIYA SABHA".to_string(),
            records: vec![Record::new("SLFP", 800, 1)],
        });
        assert_eq!(
            DistrictTotals::from_results(&results),
            DistrictTotals {
                councils: 2,
                votes: 4800,
                seats: 7,
                party_entries: 4,
            }
        );
    }
}
