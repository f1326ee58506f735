use std::io::Write;

use crate::config::{parse_sweep_config, RedunStrategy, SplitStrategy, SweepSpace};

#[test]
fn test_parse_sweep_config() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r#"
n_dac = [7, 9]
redun_strats = ["rdx2", "subrdx2lim"]
"#
    )
    .unwrap();

    let space = parse_sweep_config(f.path()).unwrap();
    assert_eq!(space.n_dac, vec![7, 9]);
    assert_eq!(
        space.redun_strats,
        vec![RedunStrategy::Rdx2, RedunStrategy::SubRdx2Lim]
    );
    // Unspecified axes fall back to the full sweep.
    assert_eq!(space.n_extra, vec![0, 2, 4, 6]);
    assert_eq!(space.split_strats.len(), 3);
}

#[test]
fn test_sweep_config_round_trip() {
    let space = SweepSpace::default();
    let serialized = toml::to_string(&space).unwrap();
    let parsed: SweepSpace = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed, space);
}

#[test]
fn test_unknown_strategy_tag_is_rejected() {
    let err = toml::from_str::<SweepSpace>(r#"redun_strats = ["rdx3"]"#);
    assert!(err.is_err());
}

#[test]
fn test_strategy_tags() {
    assert_eq!(RedunStrategy::SubRdx2Rdst.to_string(), "subrdx2rdst");
    assert_eq!(SplitStrategy::DiffCapSplit.to_string(), "diffcapsplit");
    assert_eq!(
        toml::to_string(&SweepSpace::default())
            .unwrap()
            .lines()
            .find(|l| l.starts_with("split_strats"))
            .unwrap(),
        r#"split_strats = ["nosplit", "vdivsplit", "diffcapsplit"]"#
    );
}

#[test]
fn test_params_name() {
    let p = crate::tests::params(
        9,
        2,
        RedunStrategy::SubRdx2Lim,
        SplitStrategy::VdivSplit,
    );
    assert_eq!(p.name(), "cdac_9b2e_subrdx2lim_vdivsplit");
}
