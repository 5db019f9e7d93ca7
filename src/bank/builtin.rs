//! Built-in question set
//!
//! The fixed trivia data shipped with the game. Question text is kept in
//! the language the game is played in.

use super::question::{Difficulty, Question};

/// Builds one record of the built-in set
fn question(
    id: u32,
    text: &str,
    options: [&str; 4],
    correct_answer: usize,
    category: &str,
    difficulty: Difficulty,
    base_points: u64,
) -> Question {
    Question {
        id,
        text: text.to_owned(),
        options: options.into_iter().map(str::to_owned).collect(),
        correct_answer,
        category: category.to_owned(),
        difficulty,
        base_points,
    }
}

/// Returns the built-in questions in authoring order
pub fn questions() -> Vec<Question> {
    use Difficulty::{Easy, Hard, Medium};

    vec![
        question(
            1,
            "Qual é a capital do Brasil?",
            ["São Paulo", "Rio de Janeiro", "Brasília", "Salvador"],
            2,
            "Geografia",
            Easy,
            10,
        ),
        question(
            2,
            "Qual é o maior país do mundo em extensão territorial?",
            ["China", "Estados Unidos", "Canadá", "Rússia"],
            3,
            "Geografia",
            Medium,
            20,
        ),
        question(
            3,
            "Em que continente fica o Egito?",
            ["Ásia", "Europa", "África", "América"],
            2,
            "Geografia",
            Easy,
            10,
        ),
        question(
            4,
            "Qual é o menor país do mundo?",
            ["Mônaco", "Vaticano", "San Marino", "Liechtenstein"],
            1,
            "Geografia",
            Hard,
            30,
        ),
        question(
            5,
            "Qual é o rio mais longo do mundo?",
            ["Rio Amazonas", "Rio Nilo", "Rio Mississippi", "Rio Yangtzé"],
            1,
            "Geografia",
            Medium,
            20,
        ),
        question(
            6,
            "Em que ano foi proclamada a independência do Brasil?",
            ["1820", "1822", "1824", "1825"],
            1,
            "História",
            Medium,
            20,
        ),
        question(
            7,
            "Em que ano aconteceu a Revolução Francesa?",
            ["1789", "1792", "1799", "1804"],
            0,
            "História",
            Hard,
            30,
        ),
        question(
            8,
            "Quem foi o primeiro presidente do Brasil?",
            ["Getúlio Vargas", "Deodoro da Fonseca", "Floriano Peixoto", "Prudente de Morais"],
            1,
            "História",
            Medium,
            20,
        ),
        question(
            9,
            "Em que ano terminou a Segunda Guerra Mundial?",
            ["1944", "1945", "1946", "1947"],
            1,
            "História",
            Easy,
            10,
        ),
        question(
            10,
            "Qual é o maior planeta do sistema solar?",
            ["Terra", "Saturno", "Júpiter", "Netuno"],
            2,
            "Astronomia",
            Easy,
            10,
        ),
        question(
            11,
            "Qual é a fórmula química da água?",
            ["CO2", "H2O", "O2", "NaCl"],
            1,
            "Química",
            Easy,
            10,
        ),
        question(
            12,
            "Quem desenvolveu a teoria da relatividade?",
            ["Isaac Newton", "Albert Einstein", "Galileu Galilei", "Stephen Hawking"],
            1,
            "Física",
            Medium,
            20,
        ),
        question(
            13,
            "Qual é o elemento químico mais abundante no universo?",
            ["Oxigênio", "Carbono", "Hidrogênio", "Hélio"],
            2,
            "Química",
            Hard,
            30,
        ),
        question(
            14,
            "Quantos ossos tem o corpo humano adulto?",
            ["196", "206", "216", "226"],
            1,
            "Anatomia",
            Hard,
            30,
        ),
        question(
            15,
            "Quem escreveu 'Dom Casmurro'?",
            ["José de Alencar", "Machado de Assis", "Clarice Lispector", "Guimarães Rosa"],
            1,
            "Literatura",
            Medium,
            20,
        ),
        question(
            16,
            "Quem pintou a obra 'A Última Ceia'?",
            ["Michelangelo", "Leonardo da Vinci", "Rafael", "Donatello"],
            1,
            "Arte",
            Medium,
            20,
        ),
        question(
            17,
            "Qual é a obra mais famosa de William Shakespeare?",
            ["Hamlet", "Romeu e Julieta", "Macbeth", "Rei Lear"],
            1,
            "Literatura",
            Easy,
            10,
        ),
        question(
            18,
            "Qual é o resultado de 15 × 8?",
            ["110", "120", "130", "140"],
            1,
            "Matemática",
            Easy,
            10,
        ),
        question(
            19,
            "Qual é o valor de π (pi) aproximadamente?",
            ["3.14", "3.16", "3.12", "3.18"],
            0,
            "Matemática",
            Easy,
            10,
        ),
        question(
            20,
            "Qual é a raiz quadrada de 144?",
            ["10", "11", "12", "13"],
            2,
            "Matemática",
            Medium,
            20,
        ),
        question(
            21,
            "Qual é o animal terrestre mais rápido do mundo?",
            ["Leão", "Guepardo", "Antílope", "Cavalo"],
            1,
            "Biologia",
            Medium,
            20,
        ),
        question(
            22,
            "Qual é o maior mamífero do mundo?",
            ["Elefante Africano", "Baleia Azul", "Girafa", "Rinoceronte"],
            1,
            "Biologia",
            Easy,
            10,
        ),
        question(
            23,
            "Quantos corações tem um polvo?",
            ["1", "2", "3", "4"],
            2,
            "Biologia",
            Hard,
            30,
        ),
        question(
            24,
            "Qual é o idioma mais falado no mundo?",
            ["Inglês", "Espanhol", "Mandarim", "Hindi"],
            2,
            "Linguística",
            Medium,
            20,
        ),
        question(
            25,
            "Qual é a moeda oficial do Japão?",
            ["Won", "Yuan", "Yen", "Dong"],
            2,
            "Economia",
            Easy,
            10,
        ),
        question(
            26,
            "Em que ano foi criada a internet?",
            ["1969", "1975", "1983", "1991"],
            0,
            "Tecnologia",
            Hard,
            30,
        ),
        question(
            27,
            "Qual é o esporte mais popular do mundo?",
            ["Basquete", "Futebol", "Tênis", "Vôlei"],
            1,
            "Esportes",
            Easy,
            10,
        ),
        question(
            28,
            "Quantos jogadores tem um time de futebol em campo?",
            ["10", "11", "12", "13"],
            1,
            "Esportes",
            Easy,
            10,
        ),
        question(
            29,
            "Qual é a montanha mais alta do mundo?",
            ["K2", "Monte Everest", "Kangchenjunga", "Lhotse"],
            1,
            "Geografia",
            Easy,
            10,
        ),
        question(
            30,
            "Qual é a velocidade da luz no vácuo?",
            ["300.000 km/s", "299.792.458 m/s", "150.000 km/s", "500.000 km/s"],
            1,
            "Física",
            Hard,
            30,
        ),
    ]
}
