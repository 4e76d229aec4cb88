pub mod dossier_status;
pub mod trash;
