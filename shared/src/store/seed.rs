use chrono::NaiveDate;

use crate::models::MeetingRecord;
use crate::utils::generate_id;

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default()
}

/// The fixed sample meetings the fallback cache starts from, so a degraded
/// backend still serves a recognizable data set.
pub fn seed_records() -> Vec<MeetingRecord> {
    vec![
        MeetingRecord {
            id: generate_id(),
            organizer: "maria.silva@empresa.com.br".to_string(),
            participants: vec![
                "joao.pereira@empresa.com.br".to_string(),
                "ana.oliveira@empresa.com.br".to_string(),
                "carlos.santos@empresa.com.br".to_string(),
            ],
            meeting_date: date("2025-05-20"),
            meeting_time: "14:30".to_string(),
            recording_url: "https://meeting-recordings.com/abc123".to_string(),
            transcript: "Maria: Boa tarde a todos. Vamos começar nossa reunião semanal \
                         de planejamento. João, você pode compartilhar as atualizações \
                         do seu time?\n\nJoão: Claro, Maria. Esta semana finalizamos a \
                         implementação do novo dashboard e estamos prontos para iniciar \
                         os testes com usuários."
                .to_string(),
            summary: "Reunião de planejamento semanal. João apresentou o progresso do \
                      novo dashboard; o time decidiu revisar o cronograma na próxima \
                      reunião."
                .to_string(),
        },
        MeetingRecord {
            id: generate_id(),
            organizer: "roberto.almeida@empresa.com.br".to_string(),
            participants: vec![
                "fernanda.costa@empresa.com.br".to_string(),
                "lucas.martins@empresa.com.br".to_string(),
                "patricia.ferreira@empresa.com.br".to_string(),
            ],
            meeting_date: date("2025-05-21"),
            meeting_time: "10:00".to_string(),
            recording_url: "https://meeting-recordings.com/def456".to_string(),
            transcript: "Roberto: Bom dia, pessoal. Hoje vamos discutir o feedback dos \
                         clientes sobre a última atualização do produto.\n\nFernanda: \
                         Os relatórios mostram um aumento de 23% na satisfação dos \
                         usuários após as melhorias na interface."
                .to_string(),
            summary: "Análise do feedback dos clientes após a última atualização: \
                      satisfação subiu 23%; Patrícia trabalha em otimizações de \
                      carregamento."
                .to_string(),
        },
        MeetingRecord {
            id: generate_id(),
            organizer: "eduardo.gomes@empresa.com.br".to_string(),
            participants: vec![
                "julia.lima@empresa.com.br".to_string(),
                "rafael.costa@empresa.com.br".to_string(),
                "camila.rodrigues@empresa.com.br".to_string(),
                "bruno.alves@empresa.com.br".to_string(),
            ],
            meeting_date: date("2025-05-22"),
            meeting_time: "09:15".to_string(),
            recording_url: "https://meeting-recordings.com/ghi789".to_string(),
            transcript: "Eduardo: Vamos revisar o orçamento para o próximo trimestre.\n\n\
                         Júlia: De acordo com nossas projeções, precisaremos aumentar o \
                         investimento em marketing digital em 15%."
                .to_string(),
            summary: "Revisão de orçamento do próximo trimestre: aumento de 15% em \
                      marketing digital compensado por cortes em consultoria externa e \
                      adiamento de aquisições de hardware."
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_unique_ids_and_expected_dates() {
        let records = seed_records();
        assert_eq!(records.len(), 3);
        let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        let dates: Vec<String> = records.iter().map(|r| r.meeting_date.to_string()).collect();
        assert_eq!(dates, vec!["2025-05-20", "2025-05-21", "2025-05-22"]);
    }
}
