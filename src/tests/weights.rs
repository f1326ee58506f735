use crate::config::RedunStrategy;
use crate::error::{CdacError, Result};
use crate::weights::calc_weights;
use crate::Int;

#[test]
fn test_rdx2_weights() -> Result<()> {
    let w = calc_weights(7, 0, RedunStrategy::Rdx2)?.unwrap();
    assert_eq!(w, vec![64, 32, 16, 8, 4, 2, 1]);

    let w = calc_weights(13, 0, RedunStrategy::Rdx2)?.unwrap();
    assert_eq!(w.len(), 13);
    assert_eq!(w[0], 4096);
    assert_eq!(w[12], 1);
    Ok(())
}

#[test]
fn test_rdx2_rejects_redundancy() -> Result<()> {
    assert!(calc_weights(9, 2, RedunStrategy::Rdx2)?.is_none());
    Ok(())
}

#[test]
fn test_redundant_strategies_require_extras() -> Result<()> {
    for strat in [
        RedunStrategy::SubRdx2,
        RedunStrategy::SubRdx2Lim,
        RedunStrategy::SubRdx2Rdst,
        RedunStrategy::Rdx2Rpt,
    ] {
        assert!(calc_weights(9, 0, strat)?.is_none(), "{strat}");
    }
    Ok(())
}

#[test]
fn test_subrdx2_weights() -> Result<()> {
    let w = calc_weights(7, 2, RedunStrategy::SubRdx2)?.unwrap();
    assert_eq!(w, vec![75, 44, 25, 15, 9, 5, 3, 2, 1]);

    let w = calc_weights(9, 2, RedunStrategy::SubRdx2)?.unwrap();
    assert_eq!(w, vec![290, 165, 93, 53, 30, 17, 10, 5, 3, 2, 1]);
    Ok(())
}

#[test]
fn test_subrdx2lim_weights() -> Result<()> {
    let w = calc_weights(7, 2, RedunStrategy::SubRdx2Lim)?.unwrap();
    assert_eq!(w, vec![74, 43, 25, 14, 8, 5, 2, 1, 1]);

    let w = calc_weights(9, 2, RedunStrategy::SubRdx2Lim)?.unwrap();
    assert_eq!(w, vec![290, 164, 93, 52, 30, 17, 9, 5, 3, 1, 1]);
    Ok(())
}

#[test]
fn test_subrdx2lim_never_exceeds_subrdx2() -> Result<()> {
    for (n_dac, n_extra) in [(7, 2), (9, 4), (11, 6), (13, 2)] {
        let plain = calc_weights(n_dac, n_extra, RedunStrategy::SubRdx2)?.unwrap();
        let lim = calc_weights(n_dac, n_extra, RedunStrategy::SubRdx2Lim)?.unwrap();
        for (p, l) in plain.iter().zip(lim.iter()) {
            assert!(l <= p);
        }
    }
    Ok(())
}

#[test]
fn test_subrdx2rdst_weights() -> Result<()> {
    // MSB gives up 2^(n_extra + 2); the auxiliary sequence returns it to
    // the stages below, and the trailing redundant stages stay at one unit.
    let w = calc_weights(9, 2, RedunStrategy::SubRdx2Rdst)?.unwrap();
    assert_eq!(w, vec![240, 132, 68, 34, 18, 9, 5, 3, 2, 1, 1]);

    let w = calc_weights(11, 4, RedunStrategy::SubRdx2Rdst)?.unwrap();
    assert_eq!(
        w,
        vec![960, 528, 272, 136, 72, 36, 20, 10, 6, 3, 2, 2, 2, 1, 1]
    );
    Ok(())
}

#[test]
fn test_subrdx2rdst_infeasible_when_msb_underflows() -> Result<()> {
    // 2^6 < 2^8: the MSB cannot fund the redistribution.
    assert!(calc_weights(7, 6, RedunStrategy::SubRdx2Rdst)?.is_none());
    // 2^8 == 2^8 would zero the MSB entirely.
    assert!(calc_weights(9, 6, RedunStrategy::SubRdx2Rdst)?.is_none());
    assert!(calc_weights(7, 4, RedunStrategy::SubRdx2Rdst)?.is_none());
    Ok(())
}

#[test]
fn test_rdx2rpt_weights() -> Result<()> {
    // spacing = 9 / 2 = 4: duplicates one and five positions above the LSB.
    let w = calc_weights(9, 2, RedunStrategy::Rdx2Rpt)?.unwrap();
    assert_eq!(w, vec![256, 128, 64, 32, 32, 16, 8, 4, 2, 2, 1]);
    Ok(())
}

#[test]
fn test_rdx2rpt_multiset_matches_binary_plus_duplicates() -> Result<()> {
    for (n_dac, n_extra) in [(7u32, 2u32), (9, 4), (11, 6), (13, 6)] {
        let w = calc_weights(n_dac, n_extra, RedunStrategy::Rdx2Rpt)?.unwrap();
        assert_eq!(w.len(), (n_dac + n_extra) as usize);

        let mut deduped = w.clone();
        deduped.dedup();
        assert_eq!(
            deduped,
            (0..n_dac).rev().map(|i| 1 << i).collect::<Vec<Int>>()
        );

        let spacing = (n_dac / n_extra) as usize;
        for k in 0..n_extra as usize {
            let dup: Int = 1 << (1 + k * spacing);
            assert_eq!(w.iter().filter(|&&x| x == dup).count(), 2, "weight {dup}");
        }
    }
    Ok(())
}

#[test]
fn test_invalid_sizes_are_fatal() {
    assert!(matches!(
        calc_weights(0, 0, RedunStrategy::Rdx2),
        Err(CdacError::InvalidInput(_))
    ));
    assert!(matches!(
        calc_weights(33, 2, RedunStrategy::SubRdx2),
        Err(CdacError::InvalidInput(_))
    ));
    assert!(matches!(
        calc_weights(9, 64, RedunStrategy::SubRdx2),
        Err(CdacError::InvalidInput(_))
    ));
}

macro_rules! redundant_strategy_tests {
    ($($strat:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[test]
                fn [<test_ $strat:lower _universal_invariants>]() -> Result<()> {
                    for n_dac in [7u32, 9, 11, 13] {
                        for n_extra in [2u32, 4, 6] {
                            let Some(w) =
                                calc_weights(n_dac, n_extra, RedunStrategy::$strat)?
                            else {
                                continue;
                            };
                            assert_eq!(w.len(), (n_dac + n_extra) as usize);
                            assert!(w.iter().all(|&x| x >= 1));
                            let sum: Int = w.iter().sum();
                            assert!(
                                sum >= (1 << n_dac) - 1,
                                "{strat} {n_dac}+{n_extra}: sum {sum} below full scale",
                                strat = RedunStrategy::$strat,
                            );
                        }
                    }
                    Ok(())
                }
            )*
        }
    };
}

redundant_strategy_tests!(SubRdx2, SubRdx2Lim, SubRdx2Rdst, Rdx2Rpt);
