pub mod reportes;
