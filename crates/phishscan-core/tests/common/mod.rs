pub mod gated_scorer;
