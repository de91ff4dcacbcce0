//! Chart and model presentation tables

use super::risk::{RISK_THRESHOLD_LOW, RISK_THRESHOLD_MEDIUM};

/// Series colors for the per-model probability charts
pub const MODEL_A_COLOR: &str = "#3b82f6";
pub const MODEL_C_COLOR: &str = "#22c55e";
pub const ENSEMBLE_COLOR: &str = "#8b5cf6";

/// Extracted features shown per row
pub const FEATURES_PER_ROW: usize = 6;

/// Risk gauge layout, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeConfig {
    pub height: u32,
    pub range: (f64, f64),
    pub low_range: (f64, f64),
    pub medium_range: (f64, f64),
    pub high_range: (f64, f64),
    pub threshold_value: f64,
}

pub const GAUGE_CONFIG: GaugeConfig = GaugeConfig {
    height: 300,
    range: (0.0, 100.0),
    low_range: (0.0, RISK_THRESHOLD_LOW * 100.0),
    medium_range: (RISK_THRESHOLD_LOW * 100.0, RISK_THRESHOLD_MEDIUM * 100.0),
    high_range: (RISK_THRESHOLD_MEDIUM * 100.0, 100.0),
    threshold_value: RISK_THRESHOLD_MEDIUM * 100.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub architecture: &'static str,
    pub description: &'static str,
}

pub const MODEL_INFO: [ModelInfo; 3] = [
    ModelInfo {
        key: "model_a",
        name: "Model A - Deep Learning",
        architecture: "DenseNet-121 CNN",
        description: "Convolutional Neural Network for image classification",
    },
    ModelInfo {
        key: "model_b",
        name: "Model B - Feature Extractor",
        architecture: "ResNet-50",
        description: "Extracts 18 visual features from lesion images",
    },
    ModelInfo {
        key: "model_c",
        name: "Model C - Gradient Boosting",
        architecture: "XGBoost Classifier",
        description: "Uses extracted features and metadata for classification",
    },
];

pub fn model_info(key: &str) -> Option<&'static ModelInfo> {
    MODEL_INFO.iter().find(|info| info.key == key)
}
