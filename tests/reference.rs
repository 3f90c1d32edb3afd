#[macro_use]
mod test_utils;
use test_utils::{instance, Call, RecordingEffect};

use eqvts::{
    config::SuiteConfig,
    mock::{reference_capability, MockEffect, MockFactory},
    protocol::{BandFrequency, EqualizerCapability},
    EqualizerSetting, EqualizerTag, ScenarioKind, Status, Suite,
};

#[tokio::test]
async fn test_band_write_reads_back_every_band() -> anyhow::Result<()> {
    let mut instance = instance(MockEffect::new(), -10).await;

    let outcome = run!(
        instance,
        BandMidpoint,
        EqualizerSetting::band_levels([(2, -10)])
    );
    assert!(outcome.passed(), "{:?}", outcome);

    let step = &outcome.steps[0];
    assert_eq!(step.expected, Status::Ok);
    assert_eq!(step.actual, Status::Ok);
    assert_eq!(
        step.observed,
        Some(EqualizerSetting::band_levels([
            (0, 0),
            (1, 0),
            (2, -10),
            (3, 0),
            (4, 0)
        ]))
    );

    let (_, closed) = instance.tear_down().await;
    closed?;
    Ok(())
}

#[tokio::test]
async fn test_rejected_write_is_not_read_back() -> anyhow::Result<()> {
    let (effect, calls) = RecordingEffect::new(MockEffect::new());
    let mut instance = instance(effect, -10).await;

    let outcome = run!(
        instance,
        BandAboveMax,
        EqualizerSetting::band_levels([(5, -10)])
    );
    assert!(outcome.passed(), "{:?}", outcome);
    assert_eq!(outcome.steps[0].expected, Status::IllegalArgument);
    assert_eq!(outcome.steps[0].actual, Status::IllegalArgument);
    assert_eq!(outcome.steps[0].observed, None);

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            Call::Open,
            Call::GetDescriptor,
            Call::Set(EqualizerSetting::band_levels([(5, -10)])),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_preset_round_trip() -> anyhow::Result<()> {
    let (effect, calls) = RecordingEffect::new(MockEffect::new());
    let mut instance = instance(effect, 0).await;
    assert_eq!(instance.capability().presets.max, 9);

    let outcome = run!(instance, PresetAtMax, EqualizerSetting::Preset(9));
    assert!(outcome.passed(), "{:?}", outcome);
    assert_eq!(outcome.steps[0].observed, Some(EqualizerSetting::Preset(9)));
    assert_eq!(
        calls.lock().unwrap().last(),
        Some(&Call::Get(EqualizerTag::Preset))
    );

    let (effect, closed) = instance.tear_down().await;
    closed?;
    assert_eq!(calls.lock().unwrap().last(), Some(&Call::Close));
    drop(effect);
    Ok(())
}

#[tokio::test]
async fn test_chained_writes() -> anyhow::Result<()> {
    let mut instance = instance(MockEffect::new(), 10).await;

    // Earlier band writes stay in place, a later write only touches its own bands
    let outcome = run!(
        instance,
        MultiBands,
        EqualizerSetting::band_levels([(0, 10), (4, 10)]),
        EqualizerSetting::band_levels([(2, -5)]),
        EqualizerSetting::Preset(3),
    );
    assert!(outcome.passed(), "{:?}", outcome);
    assert_eq!(
        outcome.steps[1].observed,
        Some(EqualizerSetting::band_levels([
            (0, 10),
            (1, 0),
            (2, -5),
            (3, 0),
            (4, 10)
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn test_repeated_band_keeps_first_level() -> anyhow::Result<()> {
    let mut instance = instance(MockEffect::new(), -1).await;

    let outcome = run!(
        instance,
        BandMidpoint,
        EqualizerSetting::band_levels([(3, -1), (3, 7)])
    );
    assert!(outcome.passed(), "{:?}", outcome);
    assert_eq!(
        outcome.steps[0].observed,
        Some(EqualizerSetting::band_levels([
            (0, 0),
            (1, 0),
            (2, 0),
            (3, -1),
            (4, 0)
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn test_gapped_band_layout_passes() -> anyhow::Result<()> {
    let layout = EqualizerCapability {
        band_frequencies: vec![
            BandFrequency {
                index: 0,
                min_mh: 30000,
                max_mh: 460000,
            },
            BandFrequency {
                index: 4,
                min_mh: 460001,
                max_mh: 20000000,
            },
        ],
        ..reference_capability()
    };
    let mut instance = instance(MockEffect::with_capability(layout), -10).await;
    assert_eq!(instance.capability().bands.midpoint(), 2);

    let outcomes = instance.run_all().await;
    assert!(
        test_utils::failed_kinds(&outcomes).is_empty(),
        "{:?}",
        outcomes
    );

    let midpoint = outcomes
        .iter()
        .find(|o| o.kind == ScenarioKind::BandMidpoint)
        .unwrap();
    assert_eq!(midpoint.steps[0].actual, Status::Ok);
    Ok(())
}

#[tokio::test]
async fn test_every_scenario_passes() -> anyhow::Result<()> {
    for band_level in [0, -10, 10, -1500, 1500] {
        let mut instance = instance(MockEffect::new(), band_level).await;
        let outcomes = instance.run_all().await;
        assert_eq!(outcomes.len(), 12);
        assert!(
            test_utils::failed_kinds(&outcomes).is_empty(),
            "band level {}",
            band_level
        );

        let multi = outcomes
            .iter()
            .find(|o| o.kind == ScenarioKind::MultiBands)
            .unwrap();
        assert_eq!(
            multi.steps[1].setting,
            EqualizerSetting::band_levels([(0, band_level), (4, band_level), (2, band_level)])
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_larger_layouts_pass() -> anyhow::Result<()> {
    for (presets, bands) in [(1, 1), (3, 8), (12, 31)] {
        let mut instance = instance(MockEffect::with_sizes(presets, bands), -10).await;
        let outcomes = instance.run_all().await;
        assert!(
            test_utils::failed_kinds(&outcomes).is_empty(),
            "{} presets, {} bands",
            presets,
            bands
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_reference_suite() -> anyhow::Result<()> {
    let factory = MockFactory::reference();
    let config = SuiteConfig::default();

    let report = Suite::new(&factory, &config).run().await?;
    assert_eq!(report.cases.len(), 3);
    assert!(report.passed(), "{}", report);
    assert_eq!(factory.live_instances(), 0);

    let names: Vec<_> = report.cases.iter().map(|c| c.name.as_str()).collect();
    assert!(names[0].ends_with("bandLevel_0"));
    assert!(names[1].ends_with("bandLevel__10"));
    assert!(names[2].ends_with("bandLevel_10"));
    for case in &report.cases {
        assert_eq!(case.scenarios().len(), 12);
    }

    let text = report.to_string();
    assert!(text.ends_with("3 cases, 3 passed, 0 failed\n"));
    Ok(())
}

#[tokio::test]
async fn test_call_logging_suite() -> anyhow::Result<()> {
    let factory = MockFactory::reference();
    let config = SuiteConfig {
        band_levels: vec![-10],
        ..Default::default()
    };

    let report = Suite::new(&factory, &config)
        .with_call_logging(log::Level::Debug)
        .run()
        .await?;
    assert_eq!(report.cases.len(), 1);
    assert!(report.passed(), "{}", report);
    assert_eq!(factory.live_instances(), 0);
    Ok(())
}
