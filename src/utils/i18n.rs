// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma (FR por defecto)
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();

    match lang.to_uppercase().as_str() {
        "EN" => {
            translations.insert("transporteurs", "Drivers");
            translations.insert("disponibles", "Available");
            translations.insert("bientot_disponibles", "Soon available");
            translations.insert("disponible_le", "Available from");
            translations.insert("tous", "All");
            translations.insert("disponibles_seulement", "Available only");
            translations.insert("rechercher", "Search a driver or vehicle...");
            translations.insert("selectionnes", "selected");
            translations.insert("chargement", "Checking availability...");
            translations.insert("chargement_liste", "Loading drivers...");
            translations.insert("aucun_transporteur", "No drivers available for this period");
            translations.insert("aucun_resultat", "No driver matches the search");
            translations.insert("reessayer", "Retry");
            translations.insert("fermer", "Close");
            translations.insert("vehicule_adapte", "Suitable vehicle");
            translations.insert("vehicule_non_adapte", "Vehicle not suitable");
            translations.insert("vehicules_recommandes", "Recommended vehicles");
            translations.insert("resultats_obsoletes", "Results may be outdated");
            translations.insert("ajouter", "Add");
            translations.insert("supprimer", "Remove");
            translations.insert("etape_depart", "Intermediate departure address");
            translations.insert("etape_arrivee", "Intermediate arrival address");
            translations.insert("client_supplementaire", "Additional client");
            translations.insert("observation_supplementaire", "Add an additional observation here...");
            translations.insert("deja_assignes", "Previously assigned");
            translations.insert("transporteur_inconnu", "Driver");
        }
        _ => {
            translations.insert("transporteurs", "Transporteurs");
            translations.insert("disponibles", "Disponibles");
            translations.insert("bientot_disponibles", "Bientôt disponibles");
            translations.insert("disponible_le", "Disponible le");
            translations.insert("tous", "Tous");
            translations.insert("disponibles_seulement", "Disponibles seulement");
            translations.insert("rechercher", "Rechercher un transporteur ou un véhicule...");
            translations.insert("selectionnes", "sélectionné(s)");
            translations.insert("chargement", "Vérification des disponibilités...");
            translations.insert("chargement_liste", "Chargement des transporteurs...");
            translations.insert("aucun_transporteur", "Aucun transporteur disponible pour cette période");
            translations.insert("aucun_resultat", "Aucun transporteur ne correspond à la recherche");
            translations.insert("reessayer", "Réessayer");
            translations.insert("fermer", "Fermer");
            translations.insert("vehicule_adapte", "Véhicule adapté");
            translations.insert("vehicule_non_adapte", "Véhicule non adapté");
            translations.insert("vehicules_recommandes", "Véhicules recommandés");
            translations.insert("resultats_obsoletes", "Résultats peut-être obsolètes");
            translations.insert("ajouter", "Ajouter");
            translations.insert("supprimer", "Supprimer");
            translations.insert("etape_depart", "Adresse intermédiaire de départ");
            translations.insert("etape_arrivee", "Adresse intermédiaire d'arrivée");
            translations.insert("client_supplementaire", "Client supplémentaire");
            translations.insert("observation_supplementaire", "Ajoutez une observation supplémentaire ici...");
            translations.insert("deja_assignes", "Déjà assignés");
            translations.insert("transporteur_inconnu", "Transporteur");
        }
    }

    translations
}

/// Función de traducción
///
/// # Arguments
/// * `key` - Clave de traducción
/// * `lang` - Idioma ("FR" o "EN")
///
/// # Returns
/// String traducida o la clave si no se encuentra traducción
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    // Fallback: devolver la clave si no hay traducción
    key.to_string()
}

/// "N selected" / "N sélectionné(s)"
pub fn count_label(count: usize, lang: &str) -> String {
    format!("{} {}", count, t("selectionnes", lang))
}
