//! 일본식 수익률 기준 정렬.

use super::bond::Bond;

/// 정렬 키. 수익률이 없는 채권은 0으로 취급합니다.
///
/// `-0.0`은 `0.0`과 같은 키가 되어야 하므로 `+ 0.0`으로 부호를 정규화합니다.
fn ranking_key(bond: &Bond) -> f64 {
    bond.japanese_yield.unwrap_or(0.0) + 0.0
}

/// 일본식 수익률 내림차순으로 안정 정렬합니다.
///
/// 수익률이 없는 채권은 목록에서 제외하지 않고 0으로 간주해 뒤로 보냅니다.
/// 같은 키를 가진 채권은 입력 순서를 유지합니다.
pub fn rank_by_yield(bonds: &mut [Bond]) {
    bonds.sort_by(|a, b| ranking_key(b).total_cmp(&ranking_key(a)));
}

/// 정렬된 채권 목록을 반환합니다.
pub fn ranked(mut bonds: Vec<Bond>) -> Vec<Bond> {
    rank_by_yield(&mut bonds);
    bonds
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bond(ticker: &str, japanese_yield: Option<f64>) -> Bond {
        let mut bond = Bond::new(ticker, ticker);
        bond.japanese_yield = japanese_yield;
        bond
    }

    fn tickers(bonds: &[Bond]) -> Vec<&str> {
        bonds.iter().map(|b| b.ticker.as_str()).collect()
    }

    #[test]
    fn test_descending_order() {
        let bonds = ranked(vec![
            bond("A", Some(5.0)),
            bond("B", Some(12.5)),
            bond("C", Some(9.1)),
        ]);
        assert_eq!(tickers(&bonds), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_missing_yield_sinks_but_stays() {
        let bonds = ranked(vec![
            bond("N1", None),
            bond("A", Some(3.0)),
            bond("N2", None),
            bond("B", Some(7.0)),
        ]);
        assert_eq!(tickers(&bonds), vec!["B", "A", "N1", "N2"]);
    }

    #[test]
    fn test_negative_yield_below_missing() {
        let bonds = ranked(vec![bond("NEG", Some(-2.0)), bond("NONE", None)]);
        assert_eq!(tickers(&bonds), vec!["NONE", "NEG"]);
    }

    #[test]
    fn test_negative_zero_ties_with_missing() {
        let bonds = ranked(vec![
            bond("NEGZ", Some(-0.0)),
            bond("NONE", None),
            bond("ZERO", Some(0.0)),
        ]);
        assert_eq!(tickers(&bonds), vec!["NEGZ", "NONE", "ZERO"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let bonds = ranked(vec![
            bond("X", Some(4.0)),
            bond("Y", Some(4.0)),
            bond("Z", Some(4.0)),
        ]);
        assert_eq!(tickers(&bonds), vec!["X", "Y", "Z"]);
    }

    proptest! {
        #[test]
        fn prop_present_yields_descending(
            yields in proptest::collection::vec(proptest::option::of(-50.0f64..50.0), 0..40)
        ) {
            let bonds: Vec<Bond> = yields
                .iter()
                .enumerate()
                .map(|(i, y)| bond(&i.to_string(), *y))
                .collect();
            let bonds = ranked(bonds);

            let present: Vec<f64> = bonds.iter().filter_map(|b| b.japanese_yield).collect();
            for pair in present.windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
            prop_assert_eq!(bonds.len(), yields.len());
        }
    }
}
