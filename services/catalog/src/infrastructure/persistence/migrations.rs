//! 内置数据库迁移
//!
//! 版本 1 建表；版本 2 写入演示数据，仅在配置开启时加入迁移列表。
//! 演示数据跳过已占用的 ID，已有数据的库也能开启

use catalog_adapter_postgres::Migration;

const CREATE_CATALOG_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tb_category (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tb_product (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price NUMERIC(12, 2) NOT NULL,
    img_url TEXT NOT NULL,
    date TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS tb_product_category (
    product_id BIGINT NOT NULL REFERENCES tb_product (id) ON DELETE CASCADE,
    category_id BIGINT NOT NULL REFERENCES tb_category (id) ON DELETE RESTRICT,
    PRIMARY KEY (product_id, category_id)
);

CREATE INDEX IF NOT EXISTS idx_product_category_category ON tb_product_category (category_id);
CREATE INDEX IF NOT EXISTS idx_product_name ON tb_product (name);
"#;

const SEED_DEMO_DATA: &str = r#"
INSERT INTO tb_category (id, name) VALUES
    (1, 'Livros'),
    (2, 'Eletrônicos'),
    (3, 'Computadores')
ON CONFLICT (id) DO NOTHING;

INSERT INTO tb_product (id, name, description, price, img_url, date) VALUES
    (1, 'The Lord of the Rings', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 90.5, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/1-big.jpg', TIMESTAMPTZ '2020-07-02T10:00:00Z'),
    (2, 'Smart TV', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2190.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/2-big.jpg', TIMESTAMPTZ '2020-07-03T10:00:00Z'),
    (3, 'Macbook Pro', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1250.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/3-big.jpg', TIMESTAMPTZ '2020-07-04T10:00:00Z'),
    (4, 'PC Gamer', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1200.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/4-big.jpg', TIMESTAMPTZ '2020-07-05T10:00:00Z'),
    (5, 'Rails for Dummies', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 100.99, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/5-big.jpg', TIMESTAMPTZ '2020-07-06T10:00:00Z'),
    (6, 'PC Gamer Ex', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1350.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/6-big.jpg', TIMESTAMPTZ '2020-07-07T10:00:00Z'),
    (7, 'PC Gamer X', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1350.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/7-big.jpg', TIMESTAMPTZ '2020-07-08T10:00:00Z'),
    (8, 'PC Gamer Alfa', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1850.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/8-big.jpg', TIMESTAMPTZ '2020-07-09T10:00:00Z'),
    (9, 'PC Gamer Tera', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1950.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/9-big.jpg', TIMESTAMPTZ '2020-07-10T10:00:00Z'),
    (10, 'PC Gamer Y', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1700.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/10-big.jpg', TIMESTAMPTZ '2020-07-11T10:00:00Z'),
    (11, 'PC Gamer Nitro', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1450.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/11-big.jpg', TIMESTAMPTZ '2020-07-12T10:00:00Z'),
    (12, 'PC Gamer Card', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1850.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/12-big.jpg', TIMESTAMPTZ '2020-07-13T10:00:00Z'),
    (13, 'PC Gamer Plus', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1350.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/13-big.jpg', TIMESTAMPTZ '2020-07-14T10:00:00Z'),
    (14, 'PC Gamer Hera', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2250.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/14-big.jpg', TIMESTAMPTZ '2020-07-15T10:00:00Z'),
    (15, 'PC Gamer Weed', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2200.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/15-big.jpg', TIMESTAMPTZ '2020-07-16T10:00:00Z'),
    (16, 'PC Gamer Max', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2340.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/16-big.jpg', TIMESTAMPTZ '2020-07-17T10:00:00Z'),
    (17, 'PC Gamer Turbo', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1280.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/17-big.jpg', TIMESTAMPTZ '2020-07-18T10:00:00Z'),
    (18, 'PC Gamer Hot', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1450.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/18-big.jpg', TIMESTAMPTZ '2020-07-19T10:00:00Z'),
    (19, 'PC Gamer Ez', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1750.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/19-big.jpg', TIMESTAMPTZ '2020-07-20T10:00:00Z'),
    (20, 'PC Gamer Tr', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1650.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/20-big.jpg', TIMESTAMPTZ '2020-07-21T10:00:00Z'),
    (21, 'PC Gamer Tx', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1680.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/21-big.jpg', TIMESTAMPTZ '2020-07-22T10:00:00Z'),
    (22, 'PC Gamer Er', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1850.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/22-big.jpg', TIMESTAMPTZ '2020-07-23T10:00:00Z'),
    (23, 'PC Gamer Min', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2250.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/23-big.jpg', TIMESTAMPTZ '2020-07-24T10:00:00Z'),
    (24, 'PC Gamer Boo', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2350.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/24-big.jpg', TIMESTAMPTZ '2020-07-25T10:00:00Z'),
    (25, 'PC Gamer Foo', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 4170.0, 'https://raw.githubusercontent.com/devsuperior/dscatalog-resources/master/backend/img/25-big.jpg', TIMESTAMPTZ '2020-07-26T10:00:00Z')
ON CONFLICT (id) DO NOTHING;

INSERT INTO tb_product_category (product_id, category_id) VALUES
    (1, 1), (2, 2), (2, 3), (3, 3), (4, 3), (5, 1),
    (6, 3), (7, 3), (8, 3), (9, 3), (10, 3), (11, 3),
    (12, 3), (13, 3), (14, 3), (15, 3), (16, 3), (17, 3),
    (18, 3), (19, 3), (20, 3), (21, 3), (22, 3), (23, 3),
    (24, 3), (25, 3)
ON CONFLICT DO NOTHING;

SELECT setval(pg_get_serial_sequence('tb_category', 'id'), (SELECT MAX(id) FROM tb_category));
SELECT setval(pg_get_serial_sequence('tb_product', 'id'), (SELECT MAX(id) FROM tb_product));
"#;

/// 目录服务迁移列表
pub fn catalog_migrations(seed_demo_data: bool) -> Vec<Migration> {
    let mut migrations = vec![Migration::new(1, "create_catalog_schema", CREATE_CATALOG_SCHEMA)];
    if seed_demo_data {
        migrations.push(Migration::new(2, "seed_demo_data", SEED_DEMO_DATA));
    }
    migrations
}
