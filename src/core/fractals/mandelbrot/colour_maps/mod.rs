pub mod hue_gradient;
