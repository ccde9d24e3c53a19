//! 종목 참조 데이터와 시세 데이터를 채권 스냅샷으로 병합합니다.
//!
//! 수집 방식(당일/전체)과 관계없이 소스는 [`MergeRow`] 목록을 만들고,
//! [`merge_bonds`]가 ISIN 중복을 제거한 뒤 [`Bond`]를 구성하고 수익률을 계산합니다.

use std::collections::{HashMap, HashSet};

use amx_core::{
    extract_ask_price, extract_bid_price, extract_yield, parse_number, Bond, CouponFrequency,
};
use chrono::NaiveDate;
use tracing::warn;

use crate::provider::records::non_empty;
use crate::provider::{InstrumentRecord, MarketQuote};

/// 통화로 필터링하고 ISIN으로 색인한 종목 참조 테이블.
///
/// 입력 순서를 유지하며, 같은 ISIN이 여러 번 나오면 처음 것을 사용합니다.
#[derive(Debug, Default, Clone)]
pub struct InstrumentIndex {
    order: Vec<String>,
    by_isin: HashMap<String, InstrumentRecord>,
    skipped_missing_isin: usize,
    duplicates_dropped: usize,
}

impl InstrumentIndex {
    /// 해당 통화의 종목만으로 색인을 만듭니다.
    pub fn build(records: Vec<InstrumentRecord>, currency: &str) -> Self {
        let mut index = Self::default();

        for record in records {
            if record.currency.as_deref() != Some(currency) {
                continue;
            }
            let Some(isin) = record.isin().map(str::to_string) else {
                index.skipped_missing_isin += 1;
                continue;
            };
            if index.by_isin.contains_key(&isin) {
                warn!(isin = %isin, "중복 종목 참조 레코드 무시");
                index.duplicates_dropped += 1;
                continue;
            }
            index.order.push(isin.clone());
            index.by_isin.insert(isin, record);
        }

        index
    }

    /// ISIN으로 종목을 찾습니다.
    pub fn get(&self, isin: &str) -> Option<&InstrumentRecord> {
        self.by_isin.get(isin)
    }

    /// 입력 순서대로 (ISIN, 레코드)를 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InstrumentRecord)> {
        self.order
            .iter()
            .filter_map(|isin| self.by_isin.get(isin).map(|r| (isin.as_str(), r)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// ISIN이 없어 제외된 레코드 수.
    pub fn skipped_missing_isin(&self) -> usize {
        self.skipped_missing_isin
    }

    /// 중복 ISIN으로 제외된 레코드 수.
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }
}

/// 병합 대상 한 행: ISIN, 참조 레코드, 시세.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeRow {
    pub isin: String,
    pub instrument: Option<InstrumentRecord>,
    pub quote: Option<MarketQuote>,
}

impl MergeRow {
    pub fn new(
        isin: impl Into<String>,
        instrument: Option<InstrumentRecord>,
        quote: Option<MarketQuote>,
    ) -> Self {
        Self {
            isin: isin.into(),
            instrument,
            quote,
        }
    }
}

/// 병합 결과.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// 입력 순서를 유지한 채권 목록 (정렬 전)
    pub bonds: Vec<Bond>,
    /// 중복 ISIN으로 제외된 행 수
    pub duplicates_dropped: usize,
}

/// 병합 행 하나로 채권 스냅샷을 구성합니다 (수익률 계산 전).
///
/// 단축 코드, 만기일, 약칭은 시세 쪽 값을 우선하고 없으면 참조 레코드를 사용합니다.
pub fn build_bond(row: &MergeRow) -> Bond {
    let instrument = row.instrument.as_ref();
    let quote = row.quote.as_ref();

    let pick = |from_quote: Option<&String>, from_instrument: Option<&String>| {
        non_empty(from_quote.map(String::as_str))
            .or_else(|| non_empty(from_instrument.map(String::as_str)))
            .map(str::to_string)
    };

    let ticker = pick(
        quote.and_then(|q| q.ticker.as_ref()),
        instrument.and_then(|i| i.ticker.as_ref()),
    )
    .unwrap_or_else(|| row.isin.clone());

    let mut bond = Bond::new(ticker, row.isin.clone());
    bond.maturity_date = pick(
        quote.and_then(|q| q.maturity_date.as_ref()),
        instrument.and_then(|i| i.maturity_date.as_ref()),
    );
    bond.short_name = pick(
        quote.and_then(|q| q.short_name.as_ref()),
        instrument.and_then(|i| i.short_name.as_ref()),
    );

    if let Some(quote) = quote {
        bond.ask_price = extract_ask_price(quote.price.as_ref());
        bond.bid_price = extract_bid_price(quote.price.as_ref());
        bond.ask_yield = extract_yield(quote.yield_quote.as_ref());
    }

    if let Some(instrument) = instrument {
        bond.coupon_rate = parse_number(instrument.coupon_rate.as_ref());
        bond.par_value = parse_number(instrument.par_value.as_ref());
        bond.coupon_frequency =
            non_empty(instrument.coupon_frequency.as_deref()).map(CouponFrequency::parse);
    }

    bond
}

/// 병합 행들을 채권 목록으로 만들고 `as_of` 기준 수익률을 계산합니다.
///
/// 같은 ISIN은 처음 행만 사용합니다.
pub fn merge_bonds(rows: Vec<MergeRow>, as_of: NaiveDate) -> MergeOutcome {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut outcome = MergeOutcome::default();

    for row in rows {
        if !seen.insert(row.isin.clone()) {
            warn!(isin = %row.isin, "중복 시세 행 무시");
            outcome.duplicates_dropped += 1;
            continue;
        }
        outcome.bonds.push(build_bond(&row).evaluate(as_of));
    }

    outcome
}
