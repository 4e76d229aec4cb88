//! Dossier workflow statuses.
//!
//! Wire codes are the French codes emitted by the case-management API and
//! persisted on case records. Unknown codes are never rejected here; see
//! [`super::lifecycle`] for how they degrade.

crate::define_code_enum! {
    /// Workflow stage of a dossier.
    DossierStatus {
        Received = "recu",
        AwaitingOnboarding = "attente_onboarding",
        Accepted = "accepte",
        UnderInstruction = "en_cours_instruction",
        MissingDocuments = "pieces_manquantes",
        Complete = "dossier_complet",
        Filed = "depose",
        ReceiptConfirmed = "accuse_reception",
        SupplementRequested = "complement_demande",
        FavorableDecision = "decision_favorable",
        UnfavorableDecision = "decision_defavorable",
        GroundsCommunicated = "communication_motifs",
        AppealInPreparation = "recours_preparation",
        InterimMeasuresReferral = "refere_mesures_utiles",
        SuspensionReferral = "refere_suspension",
        CaseWon = "gain_cause",
        Rejected = "rejet",
        Refused = "refuse",
        Cancelled = "annule",
        Other = "autre",
    }
}

impl DossierStatus {
    /// Terminal outcomes whose progress is forced to zero.
    pub fn is_negative_terminal(self) -> bool {
        matches!(self, DossierStatus::Refused | DossierStatus::Cancelled)
    }
}
