pub mod stage1_ties;
pub mod stage2_assessment;
pub mod stage3_classify;
pub mod stage4_rollup;
pub mod stage5_report;
