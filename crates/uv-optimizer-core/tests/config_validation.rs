use uv_optimizer_core::config::OptimizerConfig;
use uv_optimizer_core::error::UvOptimizeError;

#[test]
fn default_config_is_valid() {
    assert!(OptimizerConfig::default().validate().is_ok());
}

#[test]
fn builder_sets_every_field() {
    let cfg = OptimizerConfig::builder()
        .gap(2)
        .similarity_threshold(85)
        .ignore_valid_pixel_percent(5)
        .downsize_threshold(95)
        .padding(3)
        .check_flip(false)
        .square(true)
        .rearrange_only(true)
        .build();
    assert_eq!(cfg.gap, 2);
    assert_eq!(cfg.similarity_threshold, 85);
    assert_eq!(cfg.ignore_valid_pixel_percent, 5);
    assert_eq!(cfg.downsize_threshold, 95);
    assert_eq!(cfg.padding, 3);
    assert!(!cfg.check_flip);
    assert!(cfg.square);
    assert!(cfg.rearrange_only);
    assert!(cfg.validate().is_ok());
}

#[test]
fn thresholds_below_fifty_are_rejected() {
    let cfg = OptimizerConfig::builder().similarity_threshold(49).build();
    assert!(matches!(
        cfg.validate(),
        Err(UvOptimizeError::InvalidConfig(_))
    ));
    let cfg = OptimizerConfig::builder().downsize_threshold(10).build();
    assert!(matches!(
        cfg.validate(),
        Err(UvOptimizeError::InvalidConfig(_))
    ));
}

#[test]
fn thresholds_above_hundred_are_rejected() {
    let cfg = OptimizerConfig::builder().similarity_threshold(101).build();
    assert!(cfg.validate().is_err());
    let cfg = OptimizerConfig::builder()
        .ignore_valid_pixel_percent(101)
        .build();
    assert!(cfg.validate().is_err());
}

#[test]
fn padding_above_five_is_rejected() {
    let cfg = OptimizerConfig::builder().padding(6).build();
    assert!(cfg.validate().is_err());
}

#[test]
fn boundary_values_pass() {
    for t in [50u8, 100] {
        let cfg = OptimizerConfig::builder()
            .similarity_threshold(t)
            .downsize_threshold(t)
            .build();
        assert!(cfg.validate().is_ok());
    }
    let cfg = OptimizerConfig::builder().padding(5).build();
    assert!(cfg.validate().is_ok());
}
