//! Debt settlement service
//!
//! Equalizes spend among a chosen set of participants using their recorded
//! spend over the whole ledger, then plans payer-to-payee transfers with a
//! greedy sweep:
//!
//! 1. `balance = round(spent - average, 2)` per participant;
//! 2. creditors (positive) sorted largest first, debtors (negative) most
//!    negative first, both stable so ties keep participant order;
//! 3. the current largest creditor is paid by the current largest debtor
//!    `min(credit, debt)`, and whichever side reaches zero moves on.
//!
//! Every step settles at least one side, so a plan never has more than
//! `participants - 1` transfers. It is not guaranteed to be the smallest
//! possible plan.
//!
//! Settlement is advisory: malformed ledger rows contribute nothing instead
//! of failing the request.

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    normalize_identity, GroupId, Money, ParticipantBalance, SettlementResult, Transfer,
};
use crate::storage::{Ledger, Storage};

/// A balance closer to zero than this counts as settled
pub const SETTLE_TOLERANCE: Money = Money::from_cents(1);

fn is_settled(balance: Money) -> bool {
    balance.abs() < SETTLE_TOLERANCE
}

/// Normalize, drop blanks and deduplicate (first occurrence wins)
///
/// Matching is case-sensitive. An empty result is a validation error.
pub fn normalize_participants<I, S>(participants: I) -> LedgerResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for name in participants {
        let name = normalize_identity(name.as_ref());
        if !name.is_empty() && !normalized.iter().any(|n| n == name) {
            normalized.push(name.to_string());
        }
    }

    if normalized.is_empty() {
        return Err(LedgerError::Validation(
            "At least one participant is required".into(),
        ));
    }
    Ok(normalized)
}

/// Distinct contributors of a ledger in order of first appearance
pub fn known_contributors(ledger: &Ledger) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in &ledger.rows {
        let name = normalize_identity(row.contributor());
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Total recorded spend per participant, in participant order
///
/// Rows of non-participants are ignored. Rows with a missing or malformed
/// amount are skipped, as is a row that would overflow its participant's
/// total.
pub fn tally_spend(ledger: &Ledger, participants: &[String]) -> Vec<Money> {
    let mut spent = vec![Money::zero(); participants.len()];

    for row in &ledger.rows {
        let name = normalize_identity(row.contributor());
        let Some(index) = participants.iter().position(|p| p == name) else {
            continue;
        };
        match row.amount() {
            Ok(amount) => match spent[index].checked_add(amount) {
                Some(sum) => spent[index] = sum,
                None => warn!(
                    line = row.line(),
                    participant = name,
                    "skipping row that overflows spend"
                ),
            },
            Err(e) => debug!(line = row.line(), error = %e, "skipping row in settlement"),
        }
    }

    spent
}

/// Average spend and each participant's rounded balance against it
pub fn compute_balances(spent: &[(String, Money)]) -> (Money, Vec<ParticipantBalance>) {
    let count = spent.len() as i64;
    let total: i128 = spent.iter().map(|(_, amount)| i128::from(amount.cents())).sum();
    let average = Money::div_round_wide(total, count);

    let balances = spent
        .iter()
        .map(|(name, amount)| ParticipantBalance {
            name: name.clone(),
            spent: *amount,
            // (spent * n - total) / n keeps the average unrounded
            balance: Money::div_round_wide(
                i128::from(amount.cents()) * i128::from(count) - total,
                count,
            ),
        })
        .collect();

    (average, balances)
}

/// Greedy two-pointer sweep over sorted creditors and debtors
///
/// Returns the transfers and the signed balance left unmatched.
pub fn plan_transfers(balances: &[ParticipantBalance]) -> (Vec<Transfer>, Money) {
    let mut creditors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|p| p.balance.is_positive())
        .map(|p| (p.name.as_str(), p.balance))
        .collect();
    let mut debtors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|p| p.balance.is_negative())
        .map(|p| (p.name.as_str(), p.balance))
        .collect();

    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| a.1.cmp(&b.1));

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let amount = creditors[i].1.min(-debtors[j].1);
        if amount.is_positive() {
            transfers.push(Transfer {
                from: debtors[j].0.to_string(),
                to: creditors[i].0.to_string(),
                amount,
            });
        }

        creditors[i].1 -= amount;
        debtors[j].1 += amount;

        if is_settled(creditors[i].1) {
            i += 1;
        }
        if is_settled(debtors[j].1) {
            j += 1;
        }
    }

    let residual = creditors[i..].iter().map(|(_, b)| *b).sum::<Money>()
        + debtors[j..].iter().map(|(_, b)| *b).sum::<Money>();

    (transfers, residual)
}

/// Settle `participants` against the whole of `ledger`
pub fn settle<S: AsRef<str>>(ledger: &Ledger, participants: &[S]) -> LedgerResult<SettlementResult> {
    let participants = normalize_participants(participants)?;
    let spent = tally_spend(ledger, &participants);

    let spent: Vec<(String, Money)> = participants.into_iter().zip(spent).collect();
    let (average, balances) = compute_balances(&spent);
    let (transactions, residual) = plan_transfers(&balances);

    if !residual.is_zero() {
        debug!(residual = %residual, "settlement left a rounding residual");
    }

    Ok(SettlementResult {
        participants: balances,
        average,
        transactions,
        residual,
    })
}

/// Service for settlement plans over a group's ledger
pub struct SettlementService<'a> {
    storage: &'a Storage,
}

impl<'a> SettlementService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Plan transfers equalizing spend among `participants`
    ///
    /// No period filter applies: the entire ledger is used.
    pub fn compute_settlement<S: AsRef<str>>(
        &self,
        group: &GroupId,
        participants: &[S],
    ) -> LedgerResult<SettlementResult> {
        let ledger = self.storage.ledger.load(group)?;
        let result = settle(&ledger, participants)?;
        debug!(
            group = %group,
            participants = result.participants.len(),
            transfers = result.transactions.len(),
            "computed settlement"
        );
        Ok(result)
    }

    /// Everyone who ever recorded an expense in the group
    pub fn contributors(&self, group: &GroupId) -> LedgerResult<Vec<String>> {
        let ledger = self.storage.ledger.load(group)?;
        Ok(known_contributors(&ledger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerRow;

    fn ledger(rows: &[(&str, &str)]) -> Ledger {
        Ledger {
            header: Vec::new(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, (user, amount))| {
                    LedgerRow::new(
                        i + 2,
                        vec![
                            "2024-03-01 12:00:00".to_string(),
                            user.to_string(),
                            "Food".to_string(),
                            amount.to_string(),
                            String::new(),
                        ],
                    )
                })
                .collect(),
        }
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_three_way_scenario() {
        let ledger = ledger(&[("A", "10"), ("B", "30"), ("C", "20")]);
        let result = settle(&ledger, &["A", "B", "C"]).unwrap();

        assert_eq!(result.average, cents(2000));
        assert_eq!(result.balance_of("A"), Some(cents(-1000)));
        assert_eq!(result.balance_of("B"), Some(cents(1000)));
        assert_eq!(result.balance_of("C"), Some(cents(0)));
        assert_eq!(
            result.transactions,
            vec![Transfer {
                from: "A".into(),
                to: "B".into(),
                amount: cents(1000),
            }]
        );
        assert!(result.residual.is_zero());
    }

    #[test]
    fn test_single_participant() {
        let ledger = ledger(&[("A", "10"), ("B", "30")]);
        let result = settle(&ledger, &["A"]).unwrap();

        assert_eq!(result.average, cents(1000));
        assert_eq!(result.balance_of("A"), Some(Money::zero()));
        assert!(result.transactions.is_empty());
        assert!(result.is_settled());
    }

    #[test]
    fn test_equal_spend_needs_nothing() {
        let ledger = ledger(&[("A", "15"), ("B", "10"), ("B", "5"), ("C", "15.00")]);
        let result = settle(&ledger, &["A", "B", "C"]).unwrap();
        assert!(result.transactions.is_empty());
        assert!(result.is_settled());
    }

    #[test]
    fn test_zero_spend_is_settled() {
        let ledger = ledger(&[("Z", "50")]);
        let result = settle(&ledger, &["A", "B"]).unwrap();
        assert_eq!(result.total_spent(), Money::zero());
        assert!(result.is_settled());
    }

    #[test]
    fn test_non_participants_excluded() {
        let ledger = ledger(&[("A", "10"), ("B", "30"), ("Outsider", "1000")]);
        let result = settle(&ledger, &["A", "B"]).unwrap();

        assert_eq!(result.average, cents(2000));
        assert_eq!(result.spent_of("Outsider"), None);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].amount, cents(1000));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let ledger = ledger(&[("A", "10"), ("A", "oops"), ("A", ""), ("B", "-5"), ("B", "30")]);
        let result = settle(&ledger, &["A", "B"]).unwrap();

        assert_eq!(result.spent_of("A"), Some(cents(1000)));
        assert_eq!(result.spent_of("B"), Some(cents(3000)));
    }

    #[test]
    fn test_participant_normalization() {
        let ledger = ledger(&[("@alice", "40"), ("bob", "20"), ("Bob", "999")]);
        let result = settle(&ledger, &["@alice", " alice ", "bob", "", "@"]).unwrap();

        let names: Vec<_> = result.participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
        assert_eq!(result.spent_of("alice"), Some(cents(4000)));
        assert_eq!(result.spent_of("bob"), Some(cents(2000)));
    }

    #[test]
    fn test_empty_participants_rejected() {
        let ledger = ledger(&[("A", "10")]);
        let err = settle::<&str>(&ledger, &[]).unwrap_err();
        assert!(err.is_validation());
        assert!(settle(&ledger, &["@", "  "]).unwrap_err().is_validation());
    }

    #[test]
    fn test_tie_break_keeps_participant_order() {
        let ledger = ledger(&[("A", "30"), ("B", "30"), ("C", "0.00"), ("D", "20")]);
        // A, B: +10 each; C: -20; D: 0
        let result = settle(&ledger, &["A", "B", "C", "D"]).unwrap();
        let plan: Vec<_> = result.transactions.iter().map(|t| t.to_string()).collect();
        assert_eq!(plan, vec!["C -> A: 10.00", "C -> B: 10.00"]);

        let result = settle(&ledger, &["B", "A", "C", "D"]).unwrap();
        assert_eq!(result.transactions[0].to, "B");
    }

    #[test]
    fn test_largest_imbalances_settle_first() {
        let balances = vec![
            ParticipantBalance { name: "small_cred".into(), spent: cents(0), balance: cents(500) },
            ParticipantBalance { name: "small_debt".into(), spent: cents(0), balance: cents(-1000) },
            ParticipantBalance { name: "big_cred".into(), spent: cents(0), balance: cents(2000) },
            ParticipantBalance { name: "big_debt".into(), spent: cents(0), balance: cents(-1500) },
        ];

        let (transfers, residual) = plan_transfers(&balances);
        let plan: Vec<_> = transfers.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            plan,
            vec![
                "big_debt -> big_cred: 15.00",
                "small_debt -> big_cred: 5.00",
                "small_debt -> small_cred: 5.00",
            ]
        );
        assert!(residual.is_zero());
    }

    #[test]
    fn test_rounded_average() {
        let ledger = ledger(&[("A", "100"), ("B", "0.01")]);
        let result = settle(&ledger, &["A", "B", "C"]).unwrap();
        // total 100.01 / 3 = 33.3366..
        assert_eq!(result.average, cents(3334));
        assert_eq!(result.balance_of("A"), Some(cents(6666)));
        assert_eq!(result.balance_of("B"), Some(cents(-3333)));
        assert_eq!(result.balance_of("C"), Some(cents(-3334)));
        assert!(result.balance_sum().abs() <= SETTLE_TOLERANCE);
    }

    #[test]
    fn test_invariants_over_generated_ledgers() {
        let names = ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"];
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % bound
        };

        for _ in 0..200 {
            let rows: Vec<(String, String)> = (0..next(12))
                .map(|_| {
                    let name = names[next(names.len() as u64) as usize].to_string();
                    let amount = format!("{}.{:02}", next(200), next(100));
                    (name, amount)
                })
                .collect();
            let borrowed: Vec<(&str, &str)> =
                rows.iter().map(|(n, a)| (n.as_str(), a.as_str())).collect();
            let ledger = ledger(&borrowed);

            let count = 1 + next(names.len() as u64) as usize;
            let participants = &names[..count];
            let result = settle(&ledger, participants).unwrap();

            let n = count as i64;
            assert!(result.transactions.len() <= count.saturating_sub(1));
            assert!(result.balance_sum().cents().abs() <= n / 2 + 1);
            for transfer in &result.transactions {
                assert!(transfer.amount.is_positive());
                assert_ne!(transfer.from, transfer.to);
            }
            for (_, position) in result.positions_after_transfers() {
                assert!((position - result.average).cents().abs() <= n);
            }
        }
    }

    #[test]
    fn test_huge_amounts_do_not_overflow() {
        let huge = "90000000000000000";
        let ledger = ledger(&[("A", huge), ("B", huge), ("A", huge), ("C", "1")]);

        let spent = tally_spend(&ledger, &["A".to_string(), "B".to_string()]);
        assert_eq!(spent, vec![cents(9_000_000_000_000_000_000); 2]);

        let result = settle(&ledger, &["A", "B"]).unwrap();
        assert_eq!(result.average, cents(9_000_000_000_000_000_000));
        assert!(result.transactions.is_empty());
        assert!(result.is_settled());

        let result = settle(&ledger, &["A", "C"]).unwrap();
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].from, "C");
        assert_eq!(result.balance_sum().cents().abs(), 0);
    }

    #[test]
    fn test_settlement_reads_ledger_with_invalid_text() {
        use crate::config::paths::LedgerPaths;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        let group = GroupId::parse("trip").unwrap();

        let mut bytes = b"Date,User,Category,Price,Comment\n\
            2024-03-01 10:00:00,A,Food,10,\n\
            2024-03-02 10:00:00,B,Food,30,"
            .to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        std::fs::write(paths.expenses_file(&group), bytes).unwrap();

        let result = SettlementService::new(&storage)
            .compute_settlement(&group, &["A", "B"])
            .unwrap();
        assert_eq!(
            result.transactions,
            vec![Transfer {
                from: "A".into(),
                to: "B".into(),
                amount: cents(1000),
            }]
        );
    }

    #[test]
    fn test_known_contributors() {
        let ledger = ledger(&[("@A", "1"), ("B", "2"), ("A", "3"), ("", "4")]);
        assert_eq!(known_contributors(&ledger), vec!["A", "B"]);
    }
}
